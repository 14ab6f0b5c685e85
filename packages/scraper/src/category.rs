//! Category endpoints: the fixed catalogue of series published by the site.
//!
//! Each series is addressed by the `opcao` (and optionally `subopcao`) query
//! parameters of a shared base URL. The catalogue is compiled in and never
//! changes at runtime.

use std::fmt;

/// Default upstream base URL
pub const DEFAULT_BASE_URL: &str = "http://vitibrasil.cnpuv.embrapa.br/index.php";

/// Immutable identity of one data series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CategoryEndpoint {
    /// Top-level group, e.g. `importacao`
    pub group: &'static str,
    /// Subcategory inside the group, `None` for single-series groups
    pub name: Option<&'static str>,
    /// Human readable label
    pub label: &'static str,
    pub opcao: &'static str,
    pub subopcao: Option<&'static str>,
}

impl CategoryEndpoint {
    const fn single(group: &'static str, label: &'static str, opcao: &'static str) -> Self {
        Self {
            group,
            name: None,
            label,
            opcao,
            subopcao: None,
        }
    }

    const fn sub(
        group: &'static str,
        name: &'static str,
        label: &'static str,
        opcao: &'static str,
        subopcao: &'static str,
    ) -> Self {
        Self {
            group,
            name: Some(name),
            label,
            opcao,
            subopcao: Some(subopcao),
        }
    }

    /// Stable identifier, e.g. `importacao/vinhosMesa` or `producao`
    pub fn slug(&self) -> String {
        match self.name {
            Some(name) => format!("{}/{}", self.group, name),
            None => self.group.to_string(),
        }
    }

    /// Query string identifying this series (without the year)
    pub fn query(&self) -> String {
        match self.subopcao {
            Some(sub) => format!("subopcao={}&opcao={}", sub, self.opcao),
            None => format!("opcao={}", self.opcao),
        }
    }

    /// Full URL for one year of this series
    pub fn url(&self, base_url: &str, year: i32) -> String {
        format!("{}?{}&ano={}", base_url, self.query(), year)
    }
}

impl fmt::Display for CategoryEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.slug())
    }
}

/// Every scraped series, in the order the site lists them.
pub const CATALOGUE: &[CategoryEndpoint] = &[
    CategoryEndpoint::single("producao", "Produção de vinhos, sucos e derivados", "opt_02"),
    CategoryEndpoint::sub(
        "processamento",
        "viniferas",
        "Processamento de uvas viníferas",
        "opt_03",
        "subopt_01",
    ),
    CategoryEndpoint::sub(
        "processamento",
        "americanas",
        "Processamento de uvas americanas e híbridas",
        "opt_03",
        "subopt_02",
    ),
    CategoryEndpoint::sub(
        "processamento",
        "uvas",
        "Processamento de uvas de mesa",
        "opt_03",
        "subopt_03",
    ),
    CategoryEndpoint::sub(
        "processamento",
        "semClassificacao",
        "Processamento de uvas sem classificação",
        "opt_03",
        "subopt_04",
    ),
    CategoryEndpoint::single("comercializacao", "Comercialização de vinhos e derivados", "opt_04"),
    CategoryEndpoint::sub(
        "importacao",
        "vinhosMesa",
        "Importação de vinhos de mesa",
        "opt_05",
        "subopt_01",
    ),
    CategoryEndpoint::sub(
        "importacao",
        "espumantes",
        "Importação de espumantes",
        "opt_05",
        "subopt_02",
    ),
    CategoryEndpoint::sub(
        "importacao",
        "uvasFrescas",
        "Importação de uvas frescas",
        "opt_05",
        "subopt_03",
    ),
    CategoryEndpoint::sub(
        "importacao",
        "uvasPassas",
        "Importação de uvas passas",
        "opt_05",
        "subopt_04",
    ),
    CategoryEndpoint::sub(
        "importacao",
        "sucoUva",
        "Importação de suco de uva",
        "opt_05",
        "subopt_05",
    ),
    CategoryEndpoint::sub(
        "exportacao",
        "vinhosMesa",
        "Exportação de vinhos de mesa",
        "opt_06",
        "subopt_01",
    ),
    CategoryEndpoint::sub(
        "exportacao",
        "espumantes",
        "Exportação de espumantes",
        "opt_06",
        "subopt_02",
    ),
    CategoryEndpoint::sub(
        "exportacao",
        "uvasFrescas",
        "Exportação de uvas frescas",
        "opt_06",
        "subopt_03",
    ),
    CategoryEndpoint::sub(
        "exportacao",
        "sucoUva",
        "Exportação de suco de uva",
        "opt_06",
        "subopt_04",
    ),
];

/// Find a catalogue entry by its slug
pub fn find(slug: &str) -> Option<&'static CategoryEndpoint> {
    CATALOGUE.iter().find(|c| c.slug() == slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_url_with_subopcao() {
        let endpoint = find("importacao/espumantes").unwrap();
        assert_eq!(
            endpoint.url(DEFAULT_BASE_URL, 2020),
            "http://vitibrasil.cnpuv.embrapa.br/index.php?subopcao=subopt_02&opcao=opt_05&ano=2020"
        );
    }

    #[test]
    fn test_url_without_subopcao() {
        let endpoint = find("comercializacao").unwrap();
        assert_eq!(
            endpoint.url("http://localhost", 1999),
            "http://localhost?opcao=opt_04&ano=1999"
        );
    }

    #[test]
    fn test_catalogue_slugs_are_unique() {
        let slugs: HashSet<String> = CATALOGUE.iter().map(|c| c.slug()).collect();
        assert_eq!(slugs.len(), CATALOGUE.len());
        assert_eq!(CATALOGUE.len(), 15);
    }

    #[test]
    fn test_catalogue_queries_are_unique() {
        let queries: HashSet<String> = CATALOGUE.iter().map(|c| c.query()).collect();
        assert_eq!(queries.len(), CATALOGUE.len());
    }

    #[test]
    fn test_find_unknown() {
        assert!(find("exportacao/uvasPassas").is_none());
    }
}

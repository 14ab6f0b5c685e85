//! Canned inputs shared by the API tests.

/// Production file with two products and two year columns
pub const PRODUCTION_CSV: &str = "id;control;produto;1970;1971\n\
                                  1;VINHO DE MESA;VINHO DE MESA;217208604;154264651\n\
                                  2;vm_Tinto;Tinto;174224052;121133369\n";

pub const USERNAME: &str = "viticultor";
pub const PASSWORD: &str = "s3nha-forte";

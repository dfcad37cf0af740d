pub mod clients;
pub mod invoices;
pub mod leads;
pub mod shoots;

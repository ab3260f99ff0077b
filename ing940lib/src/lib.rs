//! ing940lib: починка CSV-выгрузок ING и перевод их в выписку MT940.

pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod traits;

pub mod formats {
    pub mod csv;
    pub mod mt940;
    pub mod quotes;
}

pub mod cities;
pub mod convert;
pub mod rates;
pub mod serve;
pub mod theme;

pub mod days;
pub mod debounce;
pub mod forecast;
pub mod open_meteo;
pub mod session;
pub mod surf;

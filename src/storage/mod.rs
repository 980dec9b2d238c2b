pub mod store;

pub use store::WeatherStore;

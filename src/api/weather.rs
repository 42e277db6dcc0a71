use serde::Deserialize;

/// Current-weather payload, limited to the fields the app displays.
#[derive(Deserialize)]
pub struct WeatherResponse {
    pub name: String,
    pub sys: WeatherSys,
    pub main: WeatherMain,
    pub weather: Vec<WeatherCondition>,
    pub wind: WeatherWind,
}

#[derive(Deserialize)]
pub struct WeatherSys {
    pub country: String,
}

#[derive(Deserialize)]
pub struct WeatherMain {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
}

#[derive(Deserialize)]
pub struct WeatherCondition {
    pub description: String,
}

#[derive(Deserialize)]
pub struct WeatherWind {
    pub speed: f64,
}

//! Static weather lookup, the canonical demo tool for the action protocol.

use anyhow::Result;
use serde_json::Value;

use super::{string_arg, Tool, ToolName, ToolResult};
use crate::constants::UNKNOWN_CITY_WEATHER;

/// Keys are lowercase; lookups lowercase the input first.
const WEATHER_TABLE: &[(&str, &str)] = &[
    ("dubai", "10°"),
    ("new york", "20°"),
    ("london", "15°"),
    ("tokyo", "25°"),
    ("delhi", "30°"),
];

/// Returns the temperature for `city`, ignoring case and surrounding
/// whitespace. Unknown cities get [`UNKNOWN_CITY_WEATHER`].
pub fn weather_for(city: &str) -> &'static str {
    let key = city.trim().to_lowercase();
    WEATHER_TABLE
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, temp)| *temp)
        .unwrap_or(UNKNOWN_CITY_WEATHER)
}

pub struct WeatherTool;

#[async_trait::async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> ToolName {
        ToolName::GetWeatherDetails
    }

    fn signature(&self) -> &str {
        "getWeatherDetails(city: Str): Str"
    }

    fn description(&self) -> &str {
        "Returns the current temperature of the city."
    }

    async fn execute(&self, input: Value) -> Result<ToolResult> {
        let city = string_arg(&input, "city")?;
        Ok(ToolResult::success(weather_for(&city).to_string()))
    }
}

use crate::scene::spec::{SceneSpec, Theme, Weather};

const SNOW: &[&str] = &["snow", "blizzard", "snowing", "snowfall", "frost"];
const RAIN: &[&str] = &["rain", "raining", "storm", "thunder", "drizzle", "shower"];
const SUNRISE: &[&str] = &["sunrise", "sun rising", "dawn", "morning"];
const NIGHT: &[&str] = &["night", "midnight", "moon", "stars"];
const BEACH: &[&str] = &["beach", "ocean", "sea", "waves", "shore"];
const FOREST: &[&str] = &["forest", "woods", "trees", "jungle", "nature"];
const CITY: &[&str] = &["city", "downtown", "skyscraper", "buildings", "street"];

const CLOUDY: &[&str] = &["cloudy", "overcast", "gray sky"];
const CLEAR: &[&str] = &["clear", "good weather", "sunny", "bright"];
const PLAYFUL: &[&str] = &["cute", "pixar", "cartoon", "whimsical"];

const PLAYFUL_BOOST: f64 = 1.15;

fn has_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}

/// Keyword prompt -> [`SceneSpec`].
///
/// Matching is case-folded substring search. The first theme group that matches wins; weather and
/// toggle modifiers then apply in a fixed order. Every input yields a spec.
#[tracing::instrument(skip(prompt), fields(len = prompt.len()))]
pub fn compile_scene(prompt: &str) -> SceneSpec {
    let t = prompt.trim().to_lowercase();
    let mut spec = SceneSpec::default();

    if has_any(&t, SNOW) {
        spec.theme = Theme::Snowy;
        spec.weather = Weather::Snow;
        spec.clouds = true;
        spec.sun = false;
    } else if has_any(&t, RAIN) {
        spec.theme = Theme::Rainy;
        spec.weather = Weather::Rain;
        spec.clouds = true;
        spec.sun = false;
    } else if has_any(&t, SUNRISE) {
        spec.theme = Theme::Sunrise;
        spec.weather = Weather::Clear;
        spec.sun = true;
        spec.clouds = true;
        spec.birds = true;
    } else if has_any(&t, NIGHT) {
        spec.theme = Theme::Night;
        spec.weather = Weather::Clear;
        spec.sun = false;
        spec.moon = true;
        spec.clouds = !t.contains("clear");
    } else if has_any(&t, BEACH) {
        spec.theme = Theme::Beach;
        spec.ocean = true;
        spec.sun = true;
        spec.clouds = true;
        spec.birds = true;
    } else if has_any(&t, FOREST) {
        spec.theme = Theme::Forest;
        spec.trees = true;
        spec.sun = true;
        spec.clouds = true;
        spec.birds = true;
    } else if has_any(&t, CITY) {
        spec.theme = Theme::City;
        spec.skyline = true;
        spec.sun = true;
        spec.clouds = true;
    } else {
        spec.theme = Theme::Day;
        spec.sun = true;
        spec.clouds = true;
    }

    if has_any(&t, CLOUDY) {
        spec.weather = Weather::Cloudy;
        spec.clouds = true;
        if matches!(spec.theme, Theme::Day | Theme::Sunrise) {
            spec.sun = false;
        }
    }

    if has_any(&t, CLEAR) {
        if spec.weather == Weather::Cloudy {
            spec.weather = Weather::Clear;
        }
        if spec.theme != Theme::Night {
            spec.sun = true;
        }
    }

    if t.contains("no clouds") {
        spec.clouds = false;
    }
    if t.contains("birds") {
        spec.birds = true;
    }

    if has_any(&t, PLAYFUL) {
        spec.saturation = PLAYFUL_BOOST;
        spec.softness = PLAYFUL_BOOST;
    }

    tracing::debug!(theme = ?spec.theme, weather = ?spec.weather, "compiled scene");
    spec
}

#[cfg(test)]
#[path = "../../tests/unit/scene/compiler.rs"]
mod tests;

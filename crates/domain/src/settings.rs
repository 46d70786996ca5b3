use crate::Time;

const LB_PER_KG: f32 = 2.204_62;

#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Settings {
    pub name: String,
    pub units: Units,
    pub theme: Theme,
    pub default_rest_time: Time,
    pub show_warmup_sets: bool,
    pub sound_enabled: bool,
    pub haptic_enabled: bool,
}

impl Settings {
    /// Merges a partial update into the settings. Fields left `None` are
    /// unchanged.
    pub fn apply(&mut self, update: SettingsUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(units) = update.units {
            self.units = units;
        }
        if let Some(theme) = update.theme {
            self.theme = theme;
        }
        if let Some(default_rest_time) = update.default_rest_time {
            self.default_rest_time = default_rest_time;
        }
        if let Some(show_warmup_sets) = update.show_warmup_sets {
            self.show_warmup_sets = show_warmup_sets;
        }
        if let Some(sound_enabled) = update.sound_enabled {
            self.sound_enabled = sound_enabled;
        }
        if let Some(haptic_enabled) = update.haptic_enabled {
            self.haptic_enabled = haptic_enabled;
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            name: String::from("Athlete"),
            units: Units::Metric,
            theme: Theme::System,
            default_rest_time: Time::new(90).unwrap_or_default(),
            show_warmup_sets: true,
            sound_enabled: true,
            haptic_enabled: false,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub name: Option<String>,
    pub units: Option<Units>,
    pub theme: Option<Theme>,
    pub default_rest_time: Option<Time>,
    pub show_warmup_sets: Option<bool>,
    pub sound_enabled: Option<bool>,
    pub haptic_enabled: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Units {
    Metric,
    Imperial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    System,
    Light,
    Dark,
}

/// Converts a weight value between unit systems for display purposes.
/// Stored weights are always metric.
#[must_use]
pub fn convert_weight(value: f32, from: Units, to: Units) -> f32 {
    match (from, to) {
        (Units::Metric, Units::Imperial) => value * LB_PER_KG,
        (Units::Imperial, Units::Metric) => value / LB_PER_KG,
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.name, "Athlete");
        assert_eq!(settings.units, Units::Metric);
        assert_eq!(settings.theme, Theme::System);
        assert_eq!(settings.default_rest_time, Time::new(90).unwrap());
        assert!(settings.show_warmup_sets);
        assert!(settings.sound_enabled);
        assert!(!settings.haptic_enabled);
    }

    #[test]
    fn test_settings_apply() {
        let mut settings = Settings::default();
        settings.apply(SettingsUpdate {
            units: Some(Units::Imperial),
            default_rest_time: Some(Time::new(120).unwrap()),
            ..SettingsUpdate::default()
        });
        assert_eq!(settings.units, Units::Imperial);
        assert_eq!(settings.default_rest_time, Time::new(120).unwrap());
        assert_eq!(settings.name, "Athlete");
        assert_eq!(settings.theme, Theme::System);
    }

    #[test]
    fn test_settings_apply_empty_update() {
        let mut settings = Settings::default();
        settings.apply(SettingsUpdate::default());
        assert_eq!(settings, Settings::default());
    }

    #[rstest]
    #[case(100.0, Units::Metric, Units::Imperial, 220.462)]
    #[case(220.462, Units::Imperial, Units::Metric, 100.0)]
    #[case(100.0, Units::Metric, Units::Metric, 100.0)]
    #[case(100.0, Units::Imperial, Units::Imperial, 100.0)]
    fn test_convert_weight(
        #[case] value: f32,
        #[case] from: Units,
        #[case] to: Units,
        #[case] expected: f32,
    ) {
        assert_approx_eq!(convert_weight(value, from, to), expected, 1e-3);
    }
}

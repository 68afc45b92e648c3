//! Theme store, the outermost provider.

use mindful_core::config::ThemePreference;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn inverted(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemeState {
    pub preference: ThemePreference,
    /// Scheme reported by the platform, used when the preference is `System`.
    pub system_scheme: ColorScheme,
}

impl ThemeState {
    pub fn resolved(&self) -> ColorScheme {
        match self.preference {
            ThemePreference::Light => ColorScheme::Light,
            ThemePreference::Dark => ColorScheme::Dark,
            ThemePreference::System => self.system_scheme,
        }
    }
}

pub struct ThemeStore {
    state: watch::Sender<ThemeState>,
}

impl ThemeStore {
    pub fn new(preference: ThemePreference) -> Self {
        let (state, _) = watch::channel(ThemeState {
            preference,
            system_scheme: ColorScheme::default(),
        });
        Self { state }
    }

    pub fn state(&self) -> ThemeState {
        *self.state.borrow()
    }

    pub fn resolved(&self) -> ColorScheme {
        self.state.borrow().resolved()
    }

    pub fn subscribe(&self) -> watch::Receiver<ThemeState> {
        self.state.subscribe()
    }

    pub fn set_preference(&self, preference: ThemePreference) {
        tracing::debug!("[ThemeStore] Preference set to {:?}", preference);
        self.state.send_modify(|s| s.preference = preference);
    }

    pub fn set_system_scheme(&self, scheme: ColorScheme) {
        self.state.send_modify(|s| s.system_scheme = scheme);
    }

    /// Switches to the explicit opposite of what is currently shown.
    pub fn toggle(&self) {
        self.state.send_modify(|s| {
            s.preference = match s.resolved().inverted() {
                ColorScheme::Light => ThemePreference::Light,
                ColorScheme::Dark => ThemePreference::Dark,
            };
        });
    }
}

//! Desktop front end: a single window rendering the registration form.

mod page;

pub use page::RegistrationPage;

use dioxus::desktop::{Config, WindowBuilder};
use dioxus::prelude::*;
use leadform::domain::config::WindowConfig;
use leadform::features::registration::FormPolicy;
use leadform::features::registration::client::SubmissionTransport;
use std::fmt;
use std::sync::Arc;

const STYLE: &str = r"
body { font-family: system-ui, sans-serif; background: #f9fafb; margin: 0; }
main { max-width: 42rem; margin: 3rem auto; background: #fff; padding: 2rem; border-radius: .5rem;
       box-shadow: 0 10px 15px -3px rgb(0 0 0 / .1); }
h1 { text-align: center; margin-bottom: 2rem; }
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(16rem, 1fr)); gap: 1rem; }
.field { display: flex; flex-direction: column; gap: .5rem; }
input, select { padding: .5rem; border: 1px solid #d1d5db; border-radius: .375rem; }
.alert { margin-top: 1.5rem; padding: .75rem 1rem; border: 1px solid; border-radius: .375rem; }
.alert.success { border-color: #22c55e; color: #15803d; }
.alert.error { border-color: #ef4444; color: #b91c1c; }
button { width: 100%; margin-top: 1.5rem; padding: .75rem; border: 0; border-radius: .375rem;
         background: #111827; color: #fff; }
button:disabled { opacity: .5; }
";

/// What the form page needs from the outside world.
#[derive(Clone)]
pub struct FormContext {
    pub policy: FormPolicy,
    pub transport: Arc<dyn SubmissionTransport>,
}

impl FormContext {
    #[must_use]
    pub fn new(policy: FormPolicy, transport: Arc<dyn SubmissionTransport>) -> Self {
        Self { policy, transport }
    }
}

impl fmt::Debug for FormContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormContext").field("policy", &self.policy).finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct DesktopApp {
    title: String,
    width: f64,
    height: f64,
}

impl Default for DesktopApp {
    fn default() -> Self {
        Self::from_config(&WindowConfig::default())
    }
}

impl DesktopApp {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_config(window: &WindowConfig) -> Self {
        Self { title: window.title.clone(), width: window.width, height: window.height }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use = "This function does nothing unless you call `launch()` on it"]
    pub const fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Opens the window and blocks until it is closed.
    pub fn launch(self, context: FormContext, root: fn() -> Element) {
        let window = WindowBuilder::new().with_title(&self.title).with_inner_size(
            dioxus::desktop::LogicalSize { width: self.width, height: self.height },
        );

        let cfg = Config::default().with_window(window).with_custom_head(format!(
            r#"<meta name="viewport" content="width=device-width, initial-scale=1.0"><style>{STYLE}</style>"#
        ));

        LaunchBuilder::desktop()
            .with_cfg(cfg)
            .with_context_provider(move || Box::new(context.clone()))
            .launch(root);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_follows_config() {
        let window = WindowConfig { title: "Inscription".into(), width: 640.0, height: 900.0 };
        let app = DesktopApp::from_config(&window).with_size(800.0, 600.0);

        assert_eq!(app.title, "Inscription");
        assert!((app.width - 800.0).abs() < f64::EPSILON);
        assert_eq!(DesktopApp::new().title, "Formulaire d'inscription");
    }
}

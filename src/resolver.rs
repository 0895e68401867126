//! Per-tab-event resolution.
//!
//! Each tab event runs this state machine once, terminal in one step:
//! placeholder URLs bail out before any further host call, a rule match
//! applies its preset, otherwise the page's body background is sampled and
//! applied as a base color unless it is absent or fully transparent.

use crate::applicator;
use crate::color;
use crate::config::Config;
use crate::error::ResolveError;
use crate::host::{BrowserHost, TabId};
use crate::matcher;
use crate::rules;

/// Terminal state of one resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The tab had no usable URL; nothing was queried or changed.
    SkippedPlaceholder,
    /// A rule preset was pushed.
    AppliedPreset,
    /// A palette derived from the sampled background was pushed.
    AppliedSampled,
    /// No rule matched and the sample was absent or transparent. The
    /// chrome keeps its previous color; this is a no-op, not an error.
    Unchanged,
}

/// New-tab and other browser-internal pages have no content to sample and
/// no meaningful URL to match.
fn is_placeholder_url(url: &str) -> bool {
    url.is_empty() || url.starts_with("about:")
}

/// Resolve one tab event to a theme decision.
///
/// Rules and the scheme preference are re-read from the host every time;
/// nothing is cached between events. All failures surface as
/// [`ResolveError`] for the dispatcher to log.
pub async fn resolve_tab(
    host: &dyn BrowserHost,
    config: &Config,
    tab_id: TabId,
) -> Result<Outcome, ResolveError> {
    let tab = host.tab_info(tab_id).await.map_err(ResolveError::TabQuery)?;
    let Some(url) = tab.url.as_deref().filter(|u| !is_placeholder_url(u)) else {
        return Ok(Outcome::SkippedPlaceholder);
    };

    let scheme = host
        .color_scheme()
        .await
        .map_err(ResolveError::Preference)?;
    // A failed rule load degrades to "no rules"; the sampling fallback
    // below still runs.
    let loaded = rules::load_rules(host, &config.rules_resource).await;
    if let Some(preset) = matcher::match_theme(loaded.as_deref(), url, scheme.is_dark()) {
        applicator::apply_preset(host, preset).await?;
        return Ok(Outcome::AppliedPreset);
    }

    let sampled = host
        .sample_background_color(tab_id)
        .await
        .map_err(ResolveError::ScriptInjection)?;
    match sampled {
        Some(sample) if !color::is_fully_transparent(&sample) => {
            applicator::apply_base_color(host, &sample, config.border_delta).await?;
            Ok(Outcome::AppliedSampled)
        }
        _ => Ok(Outcome::Unchanged),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ColorScheme;
    use crate::testsupport::MockHost;
    use crate::theme::ThemeUpdate;

    const RULES: &str = r##"[
        {"url": "a.com", "theme": {"colors": {"frame": "#dark"}}, "darkMode": true},
        {"url": "a.com", "theme": {"colors": {"frame": "#any"}}}
    ]"##;

    fn config() -> Config {
        Config::default()
    }

    #[tokio::test]
    async fn placeholder_url_short_circuits() {
        let host = MockHost::default().with_tab(1, Some("about:newtab"));
        let outcome = resolve_tab(&host, &config(), 1).await.unwrap();
        assert_eq!(outcome, Outcome::SkippedPlaceholder);
        assert_eq!(host.fetches(), 0);
        assert_eq!(host.samples(), 0);
        assert!(host.recorded_updates().is_empty());
    }

    #[tokio::test]
    async fn missing_url_short_circuits() {
        let host = MockHost::default().with_tab(1, None);
        let outcome = resolve_tab(&host, &config(), 1).await.unwrap();
        assert_eq!(outcome, Outcome::SkippedPlaceholder);
        assert_eq!(host.fetches(), 0);
    }

    #[tokio::test]
    async fn rule_match_applies_preset_without_sampling() {
        let host = MockHost::default()
            .with_rules(RULES)
            .with_tab(1, Some("https://a.com/page"));
        let outcome = resolve_tab(&host, &config(), 1).await.unwrap();
        assert_eq!(outcome, Outcome::AppliedPreset);
        assert_eq!(host.samples(), 0);

        let updates = host.recorded_updates();
        assert_eq!(updates.len(), 1);
        let ThemeUpdate::Preset(preset) = &updates[0] else {
            panic!("expected a preset update");
        };
        // Light preference skips the darkMode rule and takes the
        // unconditional one.
        assert_eq!(preset.0["colors"]["frame"], "#any");
    }

    #[tokio::test]
    async fn dark_preference_selects_the_constrained_rule() {
        let host = MockHost::default()
            .with_rules(RULES)
            .with_tab(1, Some("https://a.com/page"))
            .with_scheme(ColorScheme::Dark);
        resolve_tab(&host, &config(), 1).await.unwrap();

        let updates = host.recorded_updates();
        let ThemeUpdate::Preset(preset) = &updates[0] else {
            panic!("expected a preset update");
        };
        assert_eq!(preset.0["colors"]["frame"], "#dark");
    }

    #[tokio::test]
    async fn transparent_sample_leaves_chrome_unchanged() {
        let host = MockHost::default()
            .with_tab(1, Some("https://other.net/"))
            .with_sample(Some("rgba(0, 0, 0, 0)"));
        let outcome = resolve_tab(&host, &config(), 1).await.unwrap();
        assert_eq!(outcome, Outcome::Unchanged);
        assert_eq!(host.samples(), 1);
        assert!(host.recorded_updates().is_empty());
    }

    #[tokio::test]
    async fn absent_sample_leaves_chrome_unchanged() {
        let host = MockHost::default().with_tab(1, Some("https://other.net/"));
        let outcome = resolve_tab(&host, &config(), 1).await.unwrap();
        assert_eq!(outcome, Outcome::Unchanged);
        assert!(host.recorded_updates().is_empty());
    }

    #[tokio::test]
    async fn opaque_sample_applies_derived_palette() {
        let host = MockHost::default()
            .with_tab(1, Some("https://other.net/"))
            .with_sample(Some("rgb(10, 20, 30)"));
        let outcome = resolve_tab(&host, &config(), 1).await.unwrap();
        assert_eq!(outcome, Outcome::AppliedSampled);

        let updates = host.recorded_updates();
        assert_eq!(updates.len(), 1);
        let ThemeUpdate::Colors(palette) = &updates[0] else {
            panic!("expected a derived palette");
        };
        assert_eq!(palette.toolbar, "#0a141e");
    }

    #[tokio::test]
    async fn failed_rule_load_still_reaches_the_sampling_fallback() {
        let host = MockHost::default()
            .with_failing_rules()
            .with_tab(1, Some("https://a.com/"))
            .with_sample(Some("rgb(1, 2, 3)"));
        let outcome = resolve_tab(&host, &config(), 1).await.unwrap();
        assert_eq!(outcome, Outcome::AppliedSampled);
    }

    #[tokio::test]
    async fn unknown_tab_is_a_tab_query_error() {
        let host = MockHost::default();
        let err = resolve_tab(&host, &config(), 42).await.unwrap_err();
        assert!(matches!(err, ResolveError::TabQuery(_)), "got: {err:?}");
        assert!(host.recorded_updates().is_empty());
    }

    #[tokio::test]
    async fn injection_failure_is_a_script_error() {
        let host = MockHost::default()
            .with_tab(1, Some("https://other.net/"))
            .with_failing_sample("cannot access page");
        let err = resolve_tab(&host, &config(), 1).await.unwrap_err();
        assert!(
            matches!(err, ResolveError::ScriptInjection(_)),
            "got: {err:?}"
        );
        assert!(host.recorded_updates().is_empty());
    }
}

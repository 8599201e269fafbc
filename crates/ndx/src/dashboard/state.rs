//! User-controlled dashboard state.

use std::collections::BTreeSet;

/// Largest number of charts that can be requested.
pub const MAX_CHART_COUNT: u8 = 10;

/// Sector selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    /// Every sector of the loaded table.
    #[default]
    All,
    /// Only the listed sector labels. An empty set selects nothing.
    Only(BTreeSet<String>),
}

impl Selection {
    /// Selected labels given the sectors of the loaded table.
    pub fn resolve(&self, sectors: &[String]) -> BTreeSet<String> {
        match self {
            Self::All => sectors.iter().cloned().collect(),
            Self::Only(selected) => selected.clone(),
        }
    }
}

/// Where the user is in the interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing chosen yet; every sector is selected.
    Idle,
    /// The sector selection was changed.
    SectorsSelected,
    /// Charts were asked for.
    ChartsRequested,
}

/// Inputs of one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardState {
    /// Sector selection.
    pub selection: Selection,
    /// Number of charts to render, `1..=10`.
    pub chart_count: u8,
    /// Whether charts should be fetched and rendered.
    pub charts_requested: bool,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            selection: Selection::All,
            chart_count: 1,
            charts_requested: false,
        }
    }
}

impl DashboardState {
    /// Select only the given sector labels.
    pub fn select_sectors<I, S>(mut self, sectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection = Selection::Only(sectors.into_iter().map(Into::into).collect());
        self
    }

    /// Select every sector.
    pub fn select_all(mut self) -> Self {
        self.selection = Selection::All;
        self
    }

    /// Set the chart count, clamped to `1..=10`.
    pub fn with_chart_count(mut self, count: u8) -> Self {
        self.chart_count = count.clamp(1, MAX_CHART_COUNT);
        self
    }

    /// Ask for charts on the next render.
    pub const fn request_charts(mut self) -> Self {
        self.charts_requested = true;
        self
    }

    /// Current interaction phase.
    pub const fn phase(&self) -> Phase {
        if self.charts_requested {
            Phase::ChartsRequested
        } else if matches!(self.selection, Selection::Only(_)) {
            Phase::SectorsSelected
        } else {
            Phase::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_state() {
        let state = DashboardState::default();
        assert_eq!(state.selection, Selection::All);
        assert_eq!(state.chart_count, 1);
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(7, 7)]
    #[case(10, 10)]
    #[case(11, 10)]
    #[case(u8::MAX, 10)]
    fn test_chart_count_clamped(#[case] requested: u8, #[case] expected: u8) {
        let state = DashboardState::default().with_chart_count(requested);
        assert_eq!(state.chart_count, expected);
    }

    #[test]
    fn test_phases() {
        let state = DashboardState::default().select_sectors(["Utilities"]);
        assert_eq!(state.phase(), Phase::SectorsSelected);

        let state = state.request_charts();
        assert_eq!(state.phase(), Phase::ChartsRequested);

        let state = DashboardState::default().select_sectors(["Utilities"]).select_all();
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn test_selection_resolve() {
        let sectors = vec!["Energy".to_string(), "Utilities".to_string()];
        assert_eq!(Selection::All.resolve(&sectors).len(), 2);

        let only = Selection::Only(["Energy".to_string()].into());
        assert_eq!(
            only.resolve(&sectors).into_iter().collect::<Vec<_>>(),
            vec!["Energy"]
        );
        assert!(Selection::Only(BTreeSet::new()).resolve(&sectors).is_empty());
    }
}

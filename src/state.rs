use crate::color::CategoryColors;
use crate::data::aggregate::{PieChart, pie_chart};
use crate::data::filter::scatter_filter;
use crate::data::model::{LaunchDataset, LaunchRecord, PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// Input events
// ---------------------------------------------------------------------------

/// A change coming from one of the dashboard's input widgets.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Site dropdown changed → pie and scatter are recomputed.
    SiteSelected(SiteSelection),
    /// Payload slider changed → scatter is recomputed.
    PayloadRangeChanged(PayloadRange),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<LaunchDataset>,

    /// Current dropdown value.
    pub site: SiteSelection,

    /// Current slider value.
    pub payload_range: PayloadRange,

    /// Pie for the current site (cached).
    pub pie: Option<PieChart>,

    /// Rows passing the current site + payload filter (cached).
    pub scatter_rows: Vec<LaunchRecord>,

    /// Colour per booster version category.
    pub booster_colors: CategoryColors,

    /// Colour per launch site, for the all-sites pie.
    pub site_colors: CategoryColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            site: SiteSelection::All,
            payload_range: PayloadRange::default(),
            pie: None,
            scatter_rows: Vec::new(),
            booster_colors: CategoryColors::default(),
            site_colors: CategoryColors::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset: reset inputs, colours and both charts.
    pub fn set_dataset(&mut self, dataset: LaunchDataset) {
        self.booster_colors = CategoryColors::new(dataset.booster_categories());
        self.site_colors = CategoryColors::new(dataset.sites());
        self.site = SiteSelection::All;
        self.payload_range = dataset.payload_bounds().unwrap_or_default();
        self.dataset = Some(dataset);
        self.status_message = None;
        self.recompute_pie();
        self.recompute_scatter();
    }

    /// Apply one input change and recompute the outputs that depend on it.
    pub fn dispatch(&mut self, event: InputEvent) {
        match event {
            InputEvent::SiteSelected(site) => {
                if site == self.site {
                    return;
                }
                self.site = site;
                self.recompute_pie();
                self.recompute_scatter();
            }
            InputEvent::PayloadRangeChanged(range) => {
                if range == self.payload_range {
                    return;
                }
                self.payload_range = range;
                self.recompute_scatter();
            }
        }
    }

    /// Slider value matching the loaded data's observed payload span.
    pub fn initial_payload_range(&self) -> PayloadRange {
        self.dataset
            .as_ref()
            .and_then(LaunchDataset::payload_bounds)
            .unwrap_or_default()
    }

    fn recompute_pie(&mut self) {
        self.pie = self.dataset.as_ref().map(|ds| pie_chart(ds, &self.site));
        if let Some(pie) = &self.pie {
            log::debug!("{}: {:?} = {:?}", pie.title, pie.labels(), pie.values());
        }
    }

    fn recompute_scatter(&mut self) {
        self.scatter_rows = match &self.dataset {
            Some(ds) => scatter_filter(ds, &self.site, self.payload_range),
            None => Vec::new(),
        };
        log::debug!(
            "scatter recomputed for site {} in [{}, {}] kg: {} rows",
            self.site,
            self.payload_range.min,
            self.payload_range.max,
            self.scatter_rows.len()
        );
    }
}

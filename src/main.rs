mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::{DASHBOARD_TITLE, LaunchDashApp};
use clap::Parser;
use data::model::SiteSelection;
use eframe::egui;
use state::{AppState, InputEvent};

/// Interactive dashboard for SpaceX launch records.
#[derive(Parser, Debug)]
#[command(name = "launch-dash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Explore launch success by site and payload mass")]
struct Args {
    /// Launch records to open at startup (.csv, .json or .parquet)
    #[arg(value_name = "FILE")]
    data: Option<PathBuf>,

    /// Launch site selected at startup, or ALL
    #[arg(long, default_value = "ALL")]
    site: String,

    /// Initial window width
    #[arg(long, default_value_t = 1200.0)]
    width: f32,

    /// Initial window height
    #[arg(long, default_value_t = 800.0)]
    height: f32,
}

fn main() -> eframe::Result {
    env_logger::init();
    let args = Args::parse();

    let mut state = AppState::default();
    if let Some(path) = &args.data {
        ui::panels::load_into(&mut state, path);
        if state.dataset.is_none() {
            log::warn!("Starting without data; use File → Open… to pick another file");
        }
    }
    state.dispatch(InputEvent::SiteSelected(SiteSelection::from_value(&args.site)));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([args.width, args.height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        DASHBOARD_TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(LaunchDashApp::new(state)))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_defaults() {
        let args = Args::parse_from(["launch-dash"]);
        assert!(args.data.is_none());
        assert_eq!(args.width, 1200.0);
        assert_eq!(args.height, 800.0);
        assert_eq!(SiteSelection::from_value(&args.site), SiteSelection::All);
    }

    #[test]
    fn args_with_file() {
        let args = Args::parse_from([
            "launch-dash",
            "spacex_launch_dash.csv",
            "--width",
            "900",
            "--site",
            "KSC LC-39A",
        ]);
        assert_eq!(args.data, Some(PathBuf::from("spacex_launch_dash.csv")));
        assert_eq!(args.width, 900.0);
        assert_eq!(
            SiteSelection::from_value(&args.site),
            SiteSelection::Site("KSC LC-39A".into())
        );
    }
}

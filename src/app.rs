use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    Frame,
};
use tokio::time::MissedTickBehavior;
use tracing::info;

use crate::{
    components::{FrameBuffer, SceneView},
    config::Config,
    simulation::Simulation,
    tui,
};

pub struct App {
    frame_interval: Duration,
    simulation: Simulation,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let settings = config.scene_settings()?;
        info!(?settings, frame_interval_ms = config.display.frame_interval_ms, "starting");
        Ok(Self {
            frame_interval: Duration::from_millis(config.display.frame_interval_ms.max(1)),
            simulation: Simulation::new(settings),
        })
    }

    /// Draw frames at a fixed cadence until the process receives Ctrl-C.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = tui::Tui::new()?;
        tui.enter()?;

        let mut ticker = tokio::time::interval(self.frame_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                result = &mut shutdown => {
                    result?;
                    break;
                },
                _ = ticker.tick() => {
                    let buffer = self.simulation.next_frame();
                    tui.draw(|f| render(f, &buffer))?;
                },
            }
        }

        tui.exit()?;
        info!(frames = self.simulation.frame(), "shutting down");
        Ok(())
    }
}

fn render(f: &mut Frame, buffer: &FrameBuffer) {
    let area = centered(f.area(), buffer.width(), buffer.display_height());
    f.render_widget(SceneView::new(buffer), area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center).areas(area);
    let [area] = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center).areas(area);
    area
}

use std::fs::File;
use std::io;
use std::time::{Duration, Instant};

use expandable::prelude::*;
use paneldom::{Event, Key, Terminal};
use simplelog::{Config, LevelFilter, WriteLogger};

const FRAME: Duration = Duration::from_millis(16);
const IDLE: Duration = Duration::from_secs(1);

fn main() -> io::Result<()> {
    // Set up file logging
    let log_file = File::create("panels.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let shared = ExpandableController::new(false);
    let theme = ExpandableTheme::new().icon_color(Rgb::new(120, 200, 255));
    let mut surface = Surface::new(ui(&shared)).with_theme(theme);
    let mut reduced_motion = false;
    let mut term = Terminal::new()?;

    loop {
        let (width, height) = term.size()?;
        let buf = surface
            .frame(width, height, Instant::now())
            .map_err(io::Error::other)?;
        term.present(buf)?;

        let timeout = if surface.needs_rebuild() { FRAME } else { IDLE };
        for event in term.poll(timeout)? {
            match event {
                Event::Key {
                    key: Key::Char('q') | Key::Escape,
                    ..
                } => return Ok(()),
                Event::Key {
                    key: Key::Char('s'),
                    ..
                } => shared.toggle(),
                Event::Key {
                    key: Key::Char('r'),
                    ..
                } => {
                    reduced_motion = !reduced_motion;
                    log::info!("reduced motion: {reduced_motion}");
                    surface.set_reduced_motion(reduced_motion);
                }
                other => {
                    surface.handle_event(&other);
                }
            }
        }
    }
}

fn ui(shared: &ExpandableController) -> Column {
    let title = Style::new().bold();
    let muted = Style::new().dim();

    Column::new()
        .gap(1)
        .child(
            Element::text("Click headers or chevrons. 's' toggles the linked pair, 'r' reduced motion, 'q' quits.")
                .style(muted),
        )
        .child(ExpandablePanel::new(
            PanelConfig::new()
                .header(Element::text("Release notes").style(title))
                .collapsed(Element::text("3 changes, click to read").style(muted))
                .expanded(Element::text(
                    "- faster layout\n- smaller buffers\n- smoother fades\n(click here to collapse)",
                ))
                .tap_body_to_collapse(true),
        ))
        .child(pair_panel("Linked panel A", shared))
        .child(pair_panel("Linked panel B", shared))
        .child(ExpandablePanel::new(
            PanelConfig::new()
                .header(Element::text("Icon on the left\nwith a two-line header").style(title))
                .collapsed(Element::text("Collapsed").style(muted))
                .expanded(Element::text("Expanded with the chevron leading the header."))
                .icon_placement(IconPlacement::Left)
                .header_alignment(HeaderAlignment::Center)
                .initial_expanded(true),
        ))
        .child(ExpandableNotifier::new(
            Column::new()
                .child(ExpandableButton::new(
                    Element::text("[ slow cross-fade ]").style(title),
                ))
                .child(
                    Expandable::new()
                        .collapsed(Element::text("Tap the button above.").style(muted))
                        .expanded(Element::text(
                            "Both sides blend through the middle\nof a one second transition.",
                        ))
                        .animation_duration(Duration::from_secs(1))
                        .cross_fade_point(0.5)
                        .fade_curve(Easing::EaseInOut),
                ),
        ))
}

fn pair_panel(title: &str, shared: &ExpandableController) -> ExpandablePanel {
    ExpandablePanel::new(
        PanelConfig::new()
            .header(Element::text(title).style(Style::new().bold()))
            .collapsed(Element::text("Shares its state with the other linked panel."))
            .expanded(Element::text(format!(
                "{title} is open, and so is its twin.\nPress 's' or tap either header."
            )))
            .controller(shared.clone()),
    )
}

use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::scheduler::GlibScheduler;
use crate::gui::theme::{self, AccentStyle, ThemeColors};
use crate::gui::wheel::{self, Motion, WheelGeometry};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use rota::{CandidateName, Selector, SpinOutcome, Spinner, Winner};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

pub struct AppModel {
    pub spinner: Rc<Spinner<GlibScheduler>>,
    pub motion: Rc<RefCell<Motion>>,
    pub title: String,
    pub caretaker: Option<String>,
    pub spinning: bool,
    pub banner: Option<String>,
    pub visible: bool,
    pub accent: AccentStyle,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Show,
    Hide,
    Spin,
    SpinFinished(Winner),
    SetCandidates(Vec<CandidateName>),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Show => AppMsg::Show,
            AppEvent::Hide => AppMsg::Hide,
            AppEvent::Spin => AppMsg::Spin,
            AppEvent::SetCandidates(names) => AppMsg::SetCandidates(names),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

/// "Who's Got Mom? Alice", or "Who's Got Mom? Spinning..." while the wheel turns.
pub fn headline(title: &str, spinning: bool, caretaker: Option<&str>) -> String {
    let who = if spinning { Some("Spinning...") } else { caretaker };
    match who {
        Some(who) => format!("{title} {who}"),
        None => title.to_string(),
    }
}

pub fn winner_banner(winner: &Winner) -> String {
    format!("🎉 {} 🎉", winner.label)
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            set_title: Some("Caretaker"),
            set_default_size: (560, 680),
            #[watch]
            set_visible: model.visible,
            add_css_class: "caretaker-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::space || key == gtk::gdk::Key::Return {
                        sender.input(AppMsg::Spin);
                        return glib::Propagation::Stop;
                    }
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Hide);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 12,
                set_margin_all: 16,

                gtk::Label {
                    add_css_class: "caretaker-title",
                    #[watch]
                    set_label: &headline(&model.title, model.spinning, model.caretaker.as_deref()),
                },

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                    set_content_width: 500,
                    set_content_height: 500,
                    add_css_class: "caretaker-wheel",

                    add_controller = gtk::GestureClick {
                        connect_released[sender] => move |_, _, _, _| {
                            sender.input(AppMsg::Spin);
                        }
                    }
                },

                gtk::Button {
                    add_css_class: "caretaker-spin-button",
                    #[watch]
                    set_label: if model.spinning { "..." } else { "SPIN" },
                    #[watch]
                    set_sensitive: !model.spinning,
                    connect_clicked => AppMsg::Spin,
                },

                gtk::Label {
                    add_css_class: "caretaker-notice",
                    #[watch]
                    set_label: model.banner.as_deref().unwrap_or_default(),
                    #[watch]
                    set_visible: model.banner.is_some(),
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, rx) = init;

        theme::load_css();

        let mut model = AppModel {
            spinner: Rc::new(Spinner::new(Selector::default(), GlibScheduler)),
            motion: Rc::new(RefCell::new(Motion::default())),
            title: config.title.clone(),
            caretaker: None,
            spinning: false,
            banner: None,
            visible: true,
            accent: AccentStyle::new(),
            drawing_area: gtk::DrawingArea::default(),
        };
        model.apply_config(config);

        let done = sender.clone();
        model
            .spinner
            .on_complete(move |winner| done.input(AppMsg::SpinFinished(winner.clone())));

        let widgets = view_output!();
        model.drawing_area = widgets.drawing_area.clone();

        let spinner_draw = model.spinner.clone();
        let motion_draw = model.motion.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                // nothing to draw until the area has a usable size
                let Some(geometry) = WheelGeometry::fit(width as f64, height as f64) else {
                    return;
                };
                let colors = ThemeColors::from_context(&drawing_area.style_context());
                let selector = spinner_draw.selector();
                let rotation = motion_draw
                    .borrow()
                    .rotation_at(Instant::now(), selector.rotation_degrees());
                if let Err(e) = wheel::draw(cr, &selector, rotation, &geometry, &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let motion_tick = model.motion.clone();
        widgets.drawing_area.add_tick_callback(move |drawing_area, _| {
            if motion_tick.borrow().is_animating(Instant::now()) {
                drawing_area.queue_draw();
            }
            glib::ControlFlow::Continue
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Show => {
                self.visible = true;
                self.drawing_area.queue_draw();
            }
            AppMsg::Hide => {
                self.visible = false;
            }
            AppMsg::Spin => match self.spinner.request_spin() {
                Ok(SpinOutcome::Started(ticket)) => {
                    self.motion.borrow_mut().start(&ticket, Instant::now());
                    self.spinning = true;
                    self.banner = None;
                    self.drawing_area.queue_draw();
                }
                Ok(SpinOutcome::AlreadySpinning) => {}
                Err(e) => {
                    self.banner = Some(e.to_string());
                }
            },
            AppMsg::SpinFinished(winner) => {
                self.spinning = false;
                self.motion.borrow_mut().stop();
                self.caretaker = Some(winner.label.to_string());
                self.banner = Some(winner_banner(&winner));
                self.accent.apply(winner.color);
                self.drawing_area.queue_draw();
            }
            AppMsg::SetCandidates(names) => {
                log::info!("Received {} names over the control socket", names.len());
                self.spinner.set_candidates(names);
                self.drawing_area.queue_draw();
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.apply_config(new_config);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

impl AppModel {
    fn apply_config(&mut self, config: Config) {
        let names = config.candidate_names();
        self.title = config.title;
        self.spinner.update(|selector| {
            selector.set_palette(config.palette);
            if let Err(e) = selector.set_policy(config.spin) {
                log::error!("Keeping previous spin settings: {}", e);
            }
            selector.set_candidates(names);
        });
        self.drawing_area.queue_draw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rota::HexColor;

    #[test]
    fn test_headline() {
        assert_eq!(headline("Who's Got Mom?", false, None), "Who's Got Mom?");
        assert_eq!(
            headline("Who's Got Mom?", false, Some("Alice")),
            "Who's Got Mom? Alice"
        );
        assert_eq!(
            headline("Who's Got Mom?", true, Some("Alice")),
            "Who's Got Mom? Spinning..."
        );
    }

    #[test]
    fn test_winner_banner() {
        let winner = Winner {
            index: 1,
            label: CandidateName::new("Bob"),
            color: HexColor::rgb(0, 0, 0),
        };
        assert_eq!(winner_banner(&winner), "🎉 Bob 🎉");
    }
}

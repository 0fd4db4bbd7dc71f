use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use web_sys::Element;
use yew::prelude::*;

use crate::app::utils::{element_rect, js_random_seed, visible_viewport};
use suraido_core::{EvasivePlacer, JumpConfig, Offset};

/// Re-trigger guard: ignore clicks that land right after the button moved
/// underneath the pointer.
const DODGE_COOLDOWN_MS: f64 = 140.0;

const DODGE_TEXTS: [&str; 5] = ["Please", "Say yes", "C'mon", "Pretty please", "Just say yes"];

pub(in crate::app) enum Msg {
    Dodge(MouseEvent),
    KeepInView,
}

#[derive(Properties, Clone, PartialEq)]
pub(in crate::app) struct EvadeProps {
    /// Label shown before the first dodge.
    pub label: AttrValue,
}

/// A button that jumps away when clicked, staying inside the visible
/// viewport. The translation offset lives in the core placer; this
/// component only measures rectangles and applies the transform.
pub(in crate::app) struct EvadeButton {
    placer: EvasivePlacer,
    rng: SmallRng,
    dodges: usize,
    last_dodge_ms: f64,
    button_ref: NodeRef,
    // safety nudge scheduled right after a dodge, once layout settled
    _recheck: Option<Timeout>,
    _viewport_listeners: Vec<EventListener>,
}

impl EvadeButton {
    fn button(&self) -> Option<Element> {
        self.button_ref.cast::<Element>()
    }
}

impl Component for EvadeButton {
    type Message = Msg;
    type Properties = EvadeProps;

    fn create(ctx: &Context<Self>) -> Self {
        let window = gloo::utils::window();
        let keep_in_view = {
            let link = ctx.link().clone();
            move |_: &web_sys::Event| link.send_message(Msg::KeepInView)
        };

        // if the visible viewport changes (resize, mobile browser chrome,
        // zoom), keep the button on-screen
        let mut listeners = vec![EventListener::new(&window, "resize", keep_in_view.clone())];
        if let Some(viewport) = window.visual_viewport() {
            listeners.push(EventListener::new(&viewport, "resize", keep_in_view.clone()));
            listeners.push(EventListener::new(&viewport, "scroll", keep_in_view));
        }

        Self {
            placer: EvasivePlacer::new(),
            rng: SmallRng::seed_from_u64(js_random_seed()),
            dodges: 0,
            last_dodge_ms: 0.0,
            button_ref: NodeRef::default(),
            _recheck: None,
            _viewport_listeners: listeners,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Dodge(event) => {
                event.prevent_default();
                event.stop_propagation();

                let now = js_sys::Date::now();
                if now - self.last_dodge_ms < DODGE_COOLDOWN_MS {
                    return false;
                }
                let Some(button) = self.button() else {
                    return false;
                };
                self.last_dodge_ms = now;

                let rect = element_rect(&button);
                let offset =
                    self.placer
                        .jump(rect, visible_viewport(), JumpConfig::default(), &mut self.rng);
                log::debug!("dodged to offset ({}, {})", offset.dx, offset.dy);
                self.dodges += 1;

                let link = ctx.link().clone();
                self._recheck = Some(Timeout::new(0, move || {
                    link.send_message(Msg::KeepInView);
                }));
                true
            }
            Msg::KeepInView => {
                let Some(button) = self.button() else {
                    return false;
                };
                let rect = element_rect(&button);
                // hidden or not laid out: measurements are meaningless
                if rect.width <= 0.0 || rect.height <= 0.0 {
                    return false;
                }
                let before = self.placer.offset();
                let after =
                    self.placer
                        .nudge_into_view(rect, visible_viewport(), JumpConfig::default().margin);
                before != after
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let Offset { dx, dy } = self.placer.offset();
        let label = match self.dodges.checked_sub(1) {
            None => ctx.props().label.clone(),
            Some(i) => DODGE_TEXTS[i % DODGE_TEXTS.len()].into(),
        };

        html! {
            <button
                type="button"
                class="no-button"
                ref={self.button_ref.clone()}
                style={format!("transform: translate({dx}px, {dy}px)")}
                onclick={ctx.link().callback(Msg::Dodge)}
            >
                { label }
            </button>
        }
    }
}

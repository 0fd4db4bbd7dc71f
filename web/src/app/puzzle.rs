use gloo::timers::callback::Timeout;
use web_sys::{Element, PointerEvent};
use yew::prelude::*;

use crate::app::utils::js_random_seed;
use suraido_core::{
    Cell, PuzzleConfig, PuzzleController, TileLabel, Transition, index_to_row_col, swipe_threshold,
};

/// Fallback tile size when the board has not been laid out yet.
const DEFAULT_TILE_SIZE: f64 = 120.0;

#[derive(Clone, Debug)]
pub(in crate::app) enum Msg {
    PointerDown(PointerEvent),
    PointerMove(PointerEvent),
    PointerUp(PointerEvent),
    PointerCancel(PointerEvent),
    TileClick(TileLabel),
    NewGame,
    ReleaseTaps,
}

#[derive(Properties, Clone, PartialEq)]
pub(in crate::app) struct PuzzleProps {
    #[prop_or_default]
    pub seed: Option<u64>,
    pub on_transition: Callback<Transition>,
}

/// Board view: binds DOM pointer events to the controller's command
/// interface and renders tiles from board state.
pub(in crate::app) struct PuzzleView {
    controller: PuzzleController,
    board_ref: NodeRef,
    // pending next-turn tap-suppression release
    _release: Option<Timeout>,
}

impl PuzzleView {
    fn tile_size(&self) -> f64 {
        self.board_ref
            .cast::<Element>()
            .map(|board| {
                board.get_bounding_client_rect().width() / self.controller.config().side as f64
            })
            .filter(|&size| size > 0.0)
            .unwrap_or(DEFAULT_TILE_SIZE)
    }

    fn forward_transition(&mut self, ctx: &Context<Self>) {
        if let Some(transition) = self.controller.take_transition() {
            ctx.props().on_transition.emit(transition);
        }
    }
}

impl Component for PuzzleView {
    type Message = Msg;
    type Properties = PuzzleProps;

    fn create(ctx: &Context<Self>) -> Self {
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        let controller = PuzzleController::new(PuzzleConfig::default(), seed);
        let mut view = Self {
            controller,
            board_ref: NodeRef::default(),
            _release: None,
        };
        // a zero-move shuffle (or a degenerate walk) starts out solved
        view.forward_transition(ctx);
        view
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            PointerDown(event) => {
                // only left click for mouse; allow touch/pen
                if event.pointer_type() == "mouse" && event.button() != 0 {
                    return false;
                }
                if event.pointer_type() != "mouse" {
                    event.prevent_default();
                }
                self.controller.pointer_down(
                    event.pointer_id(),
                    f64::from(event.client_x()),
                    f64::from(event.client_y()),
                );
                false
            }
            PointerMove(event) => {
                if event.pointer_type() != "mouse" {
                    event.prevent_default();
                }
                let threshold = swipe_threshold(self.tile_size());
                let outcome = self.controller.pointer_move(
                    event.pointer_id(),
                    f64::from(event.client_x()),
                    f64::from(event.client_y()),
                    threshold,
                );
                self.forward_transition(ctx);
                outcome.has_update()
            }
            PointerUp(event) => {
                if self.controller.pointer_up(event.pointer_id()) {
                    // let the next tap click normally, but not this one
                    let link = ctx.link().clone();
                    self._release = Some(Timeout::new(0, move || {
                        link.send_message(ReleaseTaps);
                    }));
                }
                false
            }
            PointerCancel(event) => {
                self.controller.pointer_cancel(event.pointer_id());
                false
            }
            TileClick(label) => {
                let Some(index) = self.controller.board().index_of(label) else {
                    return false;
                };
                match self.controller.activate_tile(index) {
                    Ok(outcome) => {
                        self.forward_transition(ctx);
                        outcome.has_update()
                    }
                    Err(err) => {
                        log::warn!("tile activation rejected: {err}");
                        false
                    }
                }
            }
            NewGame => {
                self.controller.reset(js_random_seed());
                self.forward_transition(ctx);
                true
            }
            ReleaseTaps => {
                self.controller.release_tap_suppression();
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let board = self.controller.board();
        let side = board.side();
        let solved = self.controller.is_solved();

        let board_class = classes!("board", solved.then_some("is-complete"));
        let onpointerdown = link.callback(Msg::PointerDown);
        let onpointermove = link.callback(Msg::PointerMove);
        let onpointerup = link.callback(Msg::PointerUp);
        let onpointercancel = link.callback(Msg::PointerCancel);
        let cb_new_game = link.callback(|_| Msg::NewGame);

        html! {
            <div class="puzzle-card">
                <div
                    class={board_class}
                    ref={self.board_ref.clone()}
                    style={format!("--n: {side}")}
                    {onpointerdown}
                    {onpointermove}
                    {onpointerup}
                    {onpointercancel}
                >
                    {
                        for board.cells().iter().enumerate().filter_map(|(index, &cell)| {
                            let Cell::Tile(label) = cell else {
                                return None;
                            };
                            let (row, col) = index_to_row_col(index, side);
                            // source position of this tile's image crop
                            let (src_row, src_col) =
                                index_to_row_col(usize::from(label) - 1, side);
                            let style = format!(
                                "--sr: {src_row}; --sc: {src_col}; \
                                 transform: translate(calc({col} * var(--step)), calc({row} * var(--step)))"
                            );
                            let onclick = link.callback(move |_| Msg::TileClick(label));
                            Some(html! {
                                <button
                                    type="button"
                                    class="tile"
                                    key={label.to_string()}
                                    aria-label={format!("Tile {label}")}
                                    disabled={solved}
                                    {style}
                                    {onclick}
                                >
                                    { label }
                                </button>
                            })
                        })
                    }
                </div>
                <nav>
                    <button class="new-game" onclick={cb_new_game}>{ "New game" }</button>
                </nav>
            </div>
        }
    }
}

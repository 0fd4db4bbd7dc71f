use yew::prelude::*;

use suraido_core::Transition;

mod evade;
mod puzzle;
mod utils;

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct AppProps {
    #[prop_or_default]
    pub seed: Option<u64>,
}

pub(crate) enum Msg {
    Puzzle(Transition),
    Accept,
}

/// Page root: the puzzle on one side, the reveal prompt on the other. The
/// prompt stays hidden until the puzzle reports `BecameSolved`.
pub(crate) struct App {
    solved: bool,
    accepted: bool,
}

impl Component for App {
    type Message = Msg;
    type Properties = AppProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            solved: false,
            accepted: false,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Puzzle(Transition::BecameSolved) => {
                log::debug!("puzzle reported solved");
                self.solved = true;
                true
            }
            Msg::Puzzle(Transition::BecameUnsolved) => {
                self.solved = false;
                self.accepted = false;
                true
            }
            Msg::Accept => {
                self.accepted = true;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let on_transition = link.callback(Msg::Puzzle);
        let cb_accept = link.callback(|_| Msg::Accept);

        html! {
            <main class="suraido">
                <puzzle::PuzzleView seed={ctx.props().seed} {on_transition}/>
                <aside class="prompt" hidden={!self.solved}>
                    if self.accepted {
                        <p class="answer">{ "...you complete me!" }</p>
                    } else {
                        <p class="question">{ "Will you say yes?" }</p>
                        <div class="choices">
                            <button class="yes-button" onclick={cb_accept}>{ "Yes" }</button>
                            <evade::EvadeButton label="No" />
                        </div>
                    }
                </aside>
            </main>
        }
    }
}

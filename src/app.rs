use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::api::HttpActivityApi;
use crate::board::{ActivityBoard, BoardSurface, LOAD_FAILURE};
use crate::config::BoardConfig;
use crate::model::{ActivityCard, RosterEntry};
use crate::notice::{Notice, NoticeSlot};
use crate::state::{BoardAction, BoardState, Listing};

const SELECT_PLACEHOLDER: &str = "-- Select an activity --";

/// `BoardSurface` over the component's reducer and form controls. Dismissal
/// timers live in the shared `NoticeSlot`, so a new message drops (cancels)
/// the previous timer.
#[derive(Clone)]
struct YewSurface {
    state: UseReducerDispatcher<BoardState>,
    notices: Rc<RefCell<NoticeSlot<Timeout>>>,
    notice_ttl_ms: u32,
    email: NodeRef,
    activity: NodeRef,
}

impl BoardSurface for YewSurface {
    fn show_cards(&self, cards: Vec<ActivityCard>) {
        self.state.dispatch(BoardAction::ShowCards(cards));
    }

    fn show_load_failure(&self) {
        self.state.dispatch(BoardAction::LoadFailed);
    }

    fn set_activity_options(&self, names: Vec<String>) {
        self.state.dispatch(BoardAction::SetOptions(names));
    }

    fn signup_fields(&self) -> (String, String) {
        let email = self
            .email
            .cast::<HtmlInputElement>()
            .map(|input| input.value())
            .unwrap_or_default();
        let activity = self
            .activity
            .cast::<HtmlSelectElement>()
            .map(|select| select.value())
            .unwrap_or_default();
        (email, activity)
    }

    // Set the values directly; toggling `selected` attributes does not move
    // a select the user already changed by hand.
    fn reset_form(&self) {
        if let Some(input) = self.email.cast::<HtmlInputElement>() {
            input.set_value("");
        }
        if let Some(select) = self.activity.cast::<HtmlSelectElement>() {
            select.set_value("");
        }
    }

    fn show_notice(&self, notice: Notice) {
        let token = self.notices.borrow_mut().issue();
        self.state.dispatch(BoardAction::ShowNotice(token, notice));

        // The reducer ignores expiry for a token that is no longer shown.
        let state = self.state.clone();
        let timer = Timeout::new(self.notice_ttl_ms, move || {
            state.dispatch(BoardAction::ExpireNotice(token));
        });
        self.notices.borrow_mut().arm(token, timer);
    }

    fn confirm(&self, prompt: &str) -> bool {
        gloo::dialogs::confirm(prompt)
    }
}

type Board = ActivityBoard<HttpActivityApi, YewSurface>;

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: BoardConfig,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let state = use_reducer(BoardState::default);
    let notices = use_mut_ref(NoticeSlot::<Timeout>::default);
    let email_ref = use_node_ref();
    let activity_ref = use_node_ref();

    let board: Board = ActivityBoard::new(
        HttpActivityApi::new(&props.config.api_base),
        YewSurface {
            state: state.dispatcher(),
            notices,
            notice_ttl_ms: props.config.notice_ttl_ms,
            email: email_ref.clone(),
            activity: activity_ref.clone(),
        },
    );

    // Initial fetch when the page mounts.
    {
        let board = board.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                board.load_and_render().await;
            });
            || ()
        });
    }

    let on_remove = {
        let board = board.clone();
        Callback::from(move |entry: RosterEntry| {
            let board = board.clone();
            spawn_local(async move {
                let outcome = board
                    .remove_participant(&entry.activity_key, &entry.email_key)
                    .await;
                log::debug!("removal of {} finished: {outcome:?}", entry.email);
            });
        })
    };

    let on_submit = {
        let board = board.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let board = board.clone();
            spawn_local(async move {
                let outcome = board.submit_signup().await;
                log::debug!("sign-up finished: {outcome:?}");
            });
        })
    };

    let message = match &state.notice {
        Some((_, notice)) => html! {
            <div id="message" class={notice.kind.class()}>{ notice.text.clone() }</div>
        },
        None => html! { <div id="message" class="hidden"></div> },
    };

    html! {
      <>
        <header>
          <h1>{ "Mergington High School" }</h1>
          <h2>{ "Extracurricular Activities" }</h2>
        </header>

        <main>
          <section id="activities-container">
            <h3>{ "Available Activities" }</h3>
            <div id="activities-list">
              { render_listing(&state.listing, &on_remove) }
            </div>
          </section>

          <section id="signup-container">
            <h3>{ "Sign Up for an Activity" }</h3>
            <form id="signup-form" onsubmit={on_submit}>
              <div class="form-group">
                <label for="email">{ "Student Email:" }</label>
                <input
                  ref={email_ref}
                  type="email"
                  id="email"
                  required=true
                  placeholder="your-email@mergington.edu"
                />
              </div>
              <div class="form-group">
                <label for="activity">{ "Activity:" }</label>
                <select ref={activity_ref} id="activity" required=true>
                  <option value="">{ SELECT_PLACEHOLDER }</option>
                  { for state.options.iter().map(|name| html! {
                      <option key={name.clone()} value={name.clone()}>{ name.clone() }</option>
                  }) }
                </select>
              </div>
              <button type="submit">{ "Sign Up" }</button>
            </form>
            { message }
          </section>
        </main>
      </>
    }
}

fn render_listing(listing: &Listing, on_remove: &Callback<RosterEntry>) -> Html {
    match listing {
        Listing::Loading => html! { <p>{ "Loading activities..." }</p> },
        Listing::Failed => html! { <p>{ LOAD_FAILURE }</p> },
        Listing::Ready(cards) => html! {
            <>
              { for cards.iter().map(|card| render_card(card, on_remove)) }
            </>
        },
    }
}

fn render_card(card: &ActivityCard, on_remove: &Callback<RosterEntry>) -> Html {
    let participants = if card.roster.is_empty() {
        html! {
          <div class="participants-section"><em>{ "No participants yet." }</em></div>
        }
    } else {
        html! {
          <div class="participants-section">
            <strong>{ "Participants:" }</strong>
            <ul class="participants-list no-bullets">
              { for card.roster.iter().map(|entry| render_entry(entry, on_remove)) }
            </ul>
          </div>
        }
    };

    html! {
      <div class="activity-card" key={card.name.clone()}>
        <h4>{ card.name.clone() }</h4>
        <p>{ card.description.clone() }</p>
        <p><strong>{ "Schedule:" }</strong>{ format!(" {}", card.schedule) }</p>
        <p><strong>{ "Availability:" }</strong>{ format!(" {}", card.availability_label()) }</p>
        { participants }
      </div>
    }
}

fn render_entry(entry: &RosterEntry, on_remove: &Callback<RosterEntry>) -> Html {
    let onclick = {
        let on_remove = on_remove.clone();
        let entry = entry.clone();
        Callback::from(move |_: MouseEvent| on_remove.emit(entry.clone()))
    };

    html! {
      <li>
        <span class="participant-badge">{ entry.email.clone() }</span>
        { " " }
        <span
          class="delete-participant"
          data-activity={entry.activity_key.clone()}
          data-email={entry.email_key.clone()}
          title="Remove"
          {onclick}
        >
          { "🗑️" }
        </span>
      </li>
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use yew::ServerRenderer;

    use super::*;
    use crate::model::{build_cards, Activities};

    #[derive(Properties, PartialEq)]
    struct ListingProps {
        listing: Listing,
    }

    #[function_component(ListingView)]
    fn listing_view(props: &ListingProps) -> Html {
        render_listing(&props.listing, &Callback::noop())
    }

    fn render(listing: Listing) -> String {
        let renderer = ServerRenderer::<ListingView>::with_props(move || ListingProps { listing });
        block_on(renderer.hydratable(false).render())
    }

    fn cards(json: &str) -> Vec<ActivityCard> {
        let activities: Activities = serde_json::from_str(json).unwrap();
        build_cards(&activities)
    }

    #[test]
    fn card_with_one_participant_has_one_removal_control() {
        let html = render(Listing::Ready(cards(
            r#"{"Chess": {"description":"d","schedule":"s","max_participants":2,"participants":["a@x.com"]}}"#,
        )));

        assert!(html.contains("1 spots left"));
        assert!(html.contains("a@x.com"));
        assert!(html.contains(r#"data-email="a%40x.com""#));
        assert_eq!(html.matches(r#"class="delete-participant""#).count(), 1);
        assert!(!html.contains("No participants yet."));
    }

    #[test]
    fn empty_roster_renders_placeholder_and_no_controls() {
        let html = render(Listing::Ready(cards(
            r#"{"Art": {"description":"paint","schedule":"Mon","max_participants":5,"participants":[]}}"#,
        )));

        assert!(html.contains("No participants yet."));
        assert!(html.contains("5 spots left"));
        assert_eq!(html.matches("delete-participant").count(), 0);
    }

    #[test]
    fn failed_listing_shows_failure_text() {
        let html = render(Listing::Failed);

        assert!(html.contains("Failed to load activities. Please try again later."));
        assert!(!html.contains("activity-card"));
    }
}

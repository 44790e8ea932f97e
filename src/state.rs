use std::rc::Rc;

use yew::prelude::*;

use crate::model::ActivityCard;
use crate::notice::{Notice, NoticeToken};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Listing {
    #[default]
    Loading,
    Ready(Vec<ActivityCard>),
    Failed,
}

/// Everything the page regions display. Rebuilt wholesale on every fetch.
/// The form controls are not mirrored here: the browser owns their values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoardState {
    pub listing: Listing,
    pub options: Vec<String>,
    pub notice: Option<(NoticeToken, Notice)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoardAction {
    ShowCards(Vec<ActivityCard>),
    LoadFailed,
    SetOptions(Vec<String>),
    ShowNotice(NoticeToken, Notice),
    ExpireNotice(NoticeToken),
}

impl Reducible for BoardState {
    type Action = BoardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            BoardAction::ShowCards(cards) => next.listing = Listing::Ready(cards),
            BoardAction::LoadFailed => next.listing = Listing::Failed,
            BoardAction::SetOptions(options) => next.options = options,
            BoardAction::ShowNotice(token, notice) => next.notice = Some((token, notice)),
            BoardAction::ExpireNotice(token) => {
                if matches!(next.notice, Some((current, _)) if current == token) {
                    next.notice = None;
                } else {
                    return self;
                }
            }
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::NoticeSlot;

    fn apply(state: BoardState, actions: Vec<BoardAction>) -> BoardState {
        let mut state = Rc::new(state);
        for action in actions {
            state = state.reduce(action);
        }
        (*state).clone()
    }

    #[test]
    fn options_are_replaced_not_appended() {
        let names = vec!["Chess".to_string(), "Art".to_string()];
        let state = apply(
            BoardState::default(),
            vec![
                BoardAction::SetOptions(names.clone()),
                BoardAction::SetOptions(names.clone()),
            ],
        );
        assert_eq!(state.options, names);
    }

    #[test]
    fn stale_expiry_leaves_newer_notice_visible() {
        let mut slot: NoticeSlot<()> = NoticeSlot::default();
        let first = slot.issue();
        let second = slot.issue();

        let state = apply(
            BoardState::default(),
            vec![
                BoardAction::ShowNotice(first, Notice::success("Signed up")),
                BoardAction::ShowNotice(second, Notice::error("Activity is full")),
                BoardAction::ExpireNotice(first),
            ],
        );
        assert_eq!(state.notice, Some((second, Notice::error("Activity is full"))));

        let state = apply(state, vec![BoardAction::ExpireNotice(second)]);
        assert_eq!(state.notice, None);
    }

    #[test]
    fn load_failure_replaces_listing() {
        let state = apply(
            BoardState::default(),
            vec![BoardAction::ShowCards(vec![]), BoardAction::LoadFailed],
        );
        assert_eq!(state.listing, Listing::Failed);
    }
}

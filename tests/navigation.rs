#[cfg(test)]
mod tests {
    use std::path::Path;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use gwanju::config::Config;
    use gwanju::models::{Focus, Position};
    use gwanju::navigation::Navigator;
    use gwanju::store::{CrossRefMap, VerseStore};
    use gwanju::ui::reader::ApplicationState;

    fn press(state: &mut ApplicationState, code: KeyCode) {
        state.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn load_state() -> ApplicationState {
        let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures");
        let store = VerseStore::load(&fixtures.join("bible_data.json")).unwrap();
        let refs = CrossRefMap::load(&fixtures.join("bible_refs.json")).unwrap();
        let navigator = Navigator::starting_at(&store);
        ApplicationState::new(Config::ephemeral(), store, refs, navigator)
    }

    #[test]
    fn test_select_direct_cascade() {
        let mut nav = Navigator::default();
        assert_eq!(nav.position(), &Position::new("창세기", "1", "1"));

        nav.select_direct("창세기", "1", "3");
        assert_eq!(nav.position(), &Position::new("창세기", "1", "3"));

        nav.select_direct("창세기", "2", "3");
        assert_eq!(nav.position(), &Position::new("창세기", "2", "1"));

        nav.select_direct("요한복음", "3", "16");
        assert_eq!(nav.position(), &Position::new("요한복음", "1", "1"));
    }

    #[test]
    fn test_follow_reference_overwrites_or_ignores() {
        let mut nav = Navigator::new(Position::new("창세기", "1", "1"));

        let target = nav.follow_reference("Jn 3:16-18").cloned();
        assert_eq!(target, Some(Position::new("요한복음", "3", "16")));

        assert!(nav.follow_reference("no colon here").is_none());
        assert!(nav.follow_reference("요한복음:3").is_none());
        assert_eq!(nav.position(), &Position::new("요한복음", "3", "16"));

        // Targets outside the store are still accepted.
        nav.follow_reference("Tobit 1:1");
        assert_eq!(nav.position(), &Position::new("Tobit", "1", "1"));
    }

    #[test]
    fn test_reader_walks_the_fixture() {
        let mut state = load_state();
        assert_eq!(state.position(), &Position::new("창세기", "1", "1"));
        assert_eq!(state.ui_state.references.len(), 4);

        press(&mut state, KeyCode::Char('j'));
        press(&mut state, KeyCode::Char('j'));
        assert_eq!(state.position(), &Position::new("창세기", "1", "3"));
        assert_eq!(state.ui_state.references[0].citation, "고린도후서 4:6");

        press(&mut state, KeyCode::Char('L'));
        press(&mut state, KeyCode::Char('L'));
        assert_eq!(state.position(), &Position::new("요한복음", "1", "1"));

        press(&mut state, KeyCode::Char('H'));
        assert_eq!(state.position(), &Position::new("창세기", "2", "1"));
    }

    #[test]
    fn test_reader_follows_references_back_and_forth() {
        let mut state = load_state();

        press(&mut state, KeyCode::Tab);
        assert_eq!(state.ui_state.focus, Focus::References);
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.position(), &Position::new("요한복음", "1", "1"));
        assert_eq!(state.ui_state.references[0].citation, "창세기 1:1");

        press(&mut state, KeyCode::Tab);
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.position(), &Position::new("창세기", "1", "1"));
    }

    #[test]
    fn test_reader_follows_into_missing_verse_with_warning() {
        let mut state = load_state();
        press(&mut state, KeyCode::Tab);
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Enter);

        assert_eq!(state.position(), &Position::new("시편", "33", "6"));
        assert!(state.ui_state.message.is_some());
        assert!(state.ui_state.references.is_empty());

        // Moving on from a verse the store does not have stays put.
        press(&mut state, KeyCode::Char('j'));
        assert_eq!(state.position(), &Position::new("시편", "33", "6"));
    }

    #[test]
    fn test_reader_ignores_broken_citation() {
        let mut state = load_state();
        press(&mut state, KeyCode::Tab);
        for _ in 0..3 {
            press(&mut state, KeyCode::Char('j'));
        }
        assert_eq!(state.ui_state.references_selected_index, 3);
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.position(), &Position::new("창세기", "1", "1"));
        assert!(
            state
                .ui_state
                .message
                .as_deref()
                .is_some_and(|message| message.contains("broken citation"))
        );
    }
}

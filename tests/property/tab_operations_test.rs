//! Property-based tests for tab registry operations.
//!
//! Random sequences of open/close/switch commands are applied to one window
//! and the registry is checked against a simple model after every step.

#[path = "../common/mod.rs"]
mod common;

use chromini::host::{WindowHost, WindowOptions};
use chromini::managers::tab_manager::{TabManager, TabManagerTrait};
use chromini::services::surface_factory::SurfaceFactory;
use chromini::types::tab::ViewState;
use chromini::types::window::{WindowBounds, WindowId};
use common::{test_preferences, MockHost};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum TabOp {
    Open,
    Close,
    Next,
    Previous,
    Activate(usize),
    Welcome,
}

fn arb_tab_ops() -> impl Strategy<Value = Vec<TabOp>> {
    prop::collection::vec(
        prop_oneof![
            4 => Just(TabOp::Open),
            3 => Just(TabOp::Close),
            2 => Just(TabOp::Next),
            2 => Just(TabOp::Previous),
            2 => (0..8usize).prop_map(TabOp::Activate),
            1 => Just(TabOp::Welcome),
        ],
        1..60,
    )
}

fn setup() -> (TabManager, MockHost, WindowId) {
    let mut host = MockHost::new();
    let preferences = test_preferences();
    let window = WindowId::new();
    let options = WindowOptions {
        title: "test".to_string(),
        size: WindowBounds::default(),
        preferences: preferences.clone(),
    };
    let backend = host.create_window(window, &options).unwrap();

    let mut tabs = TabManager::new(SurfaceFactory::new(preferences));
    tabs.register_window(window, backend).unwrap();
    (tabs, host, window)
}

fn apply(tabs: &mut TabManager, window: WindowId, op: &TabOp) {
    match op {
        TabOp::Open => {
            tabs.open_tab(window, "https://example.com").unwrap();
        }
        TabOp::Close => {
            tabs.close_active_tab(window).unwrap();
        }
        TabOp::Next => {
            tabs.next_tab(window).unwrap();
        }
        TabOp::Previous => {
            tabs.previous_tab(window).unwrap();
        }
        TabOp::Activate(index) => {
            tabs.activate_tab(window, *index).unwrap();
        }
        TabOp::Welcome => tabs.activate_welcome(window).unwrap(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The active index is always -1 or a valid position, and it is -1
    /// whenever there are no tabs. Exactly the surface it names is shown.
    #[test]
    fn active_index_stays_in_range(ops in arb_tab_ops()) {
        let (mut tabs, host, window) = setup();

        for op in &ops {
            apply(&mut tabs, window, op);

            let state = tabs.tab_state(window).unwrap();
            let index = state.active_index();
            prop_assert!(index >= -1 && index < state.len() as isize);
            if state.is_empty() {
                prop_assert_eq!(index, -1);
            }

            let visible = tabs.visible_surface(window).unwrap();
            prop_assert_eq!(host.visible_surfaces(), vec![visible]);
            match state.view_state() {
                ViewState::Welcome => prop_assert_eq!(Some(visible), tabs.welcome_surface(window)),
                ViewState::Tab(i) => prop_assert_eq!(visible, state.surfaces()[i]),
            }
        }
    }

    /// Tab count equals opens minus closes that had an active tab, and the
    /// registry holds exactly the live surfaces plus the welcome page.
    #[test]
    fn open_close_bookkeeping(ops in arb_tab_ops()) {
        let (mut tabs, _host, window) = setup();
        let mut expected = 0usize;

        for op in &ops {
            let had_active = tabs.tab_state(window).unwrap().active_surface().is_some();
            apply(&mut tabs, window, op);
            match op {
                TabOp::Open => expected += 1,
                TabOp::Close if had_active => expected -= 1,
                _ => {}
            }
            prop_assert_eq!(tabs.tab_count(window), expected);
            prop_assert_eq!(tabs.surface_count(), expected + 1);
        }
    }

    /// Opening a tab and closing it right away restores the previous view.
    #[test]
    fn open_then_close_restores_view(ops in arb_tab_ops()) {
        let (mut tabs, _host, window) = setup();
        for op in &ops {
            apply(&mut tabs, window, op);
        }

        let before = tabs.visible_surface(window);
        let count = tabs.tab_count(window);
        tabs.open_tab(window, "https://fresh.example").unwrap();
        tabs.close_active_tab(window).unwrap();

        prop_assert_eq!(tabs.visible_surface(window), before);
        prop_assert_eq!(tabs.tab_count(window), count);
    }

    /// With a tab active, `len` steps of next_tab come back to the start.
    #[test]
    fn next_tab_is_cyclic(count in 1usize..8, start in 0usize..8) {
        let (mut tabs, _host, window) = setup();
        for _ in 0..count {
            tabs.open_tab(window, "https://example.com").unwrap();
        }
        let start = start % count;
        tabs.activate_tab(window, start).unwrap();

        for step in 1..=count {
            tabs.next_tab(window).unwrap();
            let expected = if count == 1 { start } else { (start + step) % count };
            prop_assert_eq!(tabs.view_state(window), Some(ViewState::Tab(expected)));
        }
    }
}

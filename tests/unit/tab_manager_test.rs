//! Unit tests for the TabManager.
//!
//! A shell with one open window is driven through the recording mock host,
//! then the tests check both the tab state and what the host was told.

#[path = "../common/mod.rs"]
mod common;

use chromini::managers::history_manager::HistoryManagerTrait;
use chromini::managers::tab_manager::{MenuOutcome, TabManagerTrait, DEFAULT_TITLE};
use chromini::services::context_menu::{ContextMenuItem, ContextParams, MenuAction};
use chromini::services::surface_factory::WELCOME_URL;
use chromini::types::errors::TabError;
use chromini::types::tab::ViewState;
use chromini::types::window::WindowId;
use common::{app_with_window, SurfaceCall};

#[test]
fn test_new_window_shows_welcome() {
    let (_dir, app, host, window) = app_with_window();
    let tabs = &app.tab_manager;

    assert_eq!(tabs.view_state(window), Some(ViewState::Welcome));
    assert_eq!(tabs.tab_count(window), 0);

    let welcome = tabs.welcome_surface(window).unwrap();
    assert_eq!(tabs.visible_surface(window), Some(welcome));
    assert_eq!(host.visible_surfaces(), vec![welcome]);
    assert_eq!(host.navigations(welcome), vec![WELCOME_URL.to_string()]);
    assert_eq!(host.title(window), DEFAULT_TITLE);
}

#[test]
fn test_open_tab_on_welcome() {
    let (_dir, mut app, host, window) = app_with_window();

    let tab = app.tab_manager.open_tab(window, "example.com").unwrap();
    assert_eq!(app.tab_manager.view_state(window), Some(ViewState::Tab(0)));
    assert_eq!(host.navigations(tab), vec!["https://example.com".to_string()]);
    assert_eq!(host.visible_surfaces(), vec![tab]);
}

#[test]
fn test_open_tab_inserts_after_active() {
    let (_dir, mut app, _host, window) = app_with_window();
    let tabs = &mut app.tab_manager;

    let a = tabs.open_tab(window, "https://a.com").unwrap();
    let b = tabs.open_tab(window, "https://b.com").unwrap();
    tabs.activate_tab(window, 0).unwrap();
    let c = tabs.open_tab(window, "https://c.com").unwrap();

    assert_eq!(tabs.tab_state(window).unwrap().surfaces(), &[a, c, b]);
    assert_eq!(tabs.view_state(window), Some(ViewState::Tab(1)));
}

#[test]
fn test_close_second_of_two_tabs() {
    let (_dir, mut app, host, window) = app_with_window();
    let tabs = &mut app.tab_manager;

    let first = tabs.open_tab(window, "https://a.com").unwrap();
    let second = tabs.open_tab(window, "https://b.com").unwrap();
    tabs.activate_tab(window, 0).unwrap();
    tabs.activate_tab(window, 1).unwrap();

    assert!(tabs.close_active_tab(window).unwrap());
    assert_eq!(tabs.tab_count(window), 1);
    assert_eq!(tabs.view_state(window), Some(ViewState::Tab(0)));
    assert!(host.is_destroyed(second));
    assert!(tabs.surface(second).is_none());
    assert_eq!(host.visible_surfaces(), vec![first]);
}

#[test]
fn test_closing_fresh_tab_returns_to_opener() {
    let (_dir, mut app, host, window) = app_with_window();
    let tabs = &mut app.tab_manager;

    tabs.open_tab(window, "https://a.com").unwrap();
    let b = tabs.open_tab(window, "https://b.com").unwrap();
    tabs.open_tab(window, "https://c.com").unwrap();
    tabs.activate_tab(window, 1).unwrap();
    // Lands at index 2, between b and c.
    tabs.open_tab(window, "https://d.com").unwrap();

    tabs.close_active_tab(window).unwrap();
    assert_eq!(tabs.view_state(window), Some(ViewState::Tab(1)));
    assert_eq!(host.visible_surfaces(), vec![b]);
}

#[test]
fn test_closing_first_tab_opened_from_welcome_returns_to_welcome() {
    let (_dir, mut app, host, window) = app_with_window();
    let tabs = &mut app.tab_manager;
    let welcome = tabs.welcome_surface(window).unwrap();

    tabs.open_tab(window, "https://a.com").unwrap();
    tabs.close_active_tab(window).unwrap();

    assert_eq!(tabs.view_state(window), Some(ViewState::Welcome));
    assert_eq!(host.visible_surfaces(), vec![welcome]);
    assert_eq!(host.title(window), DEFAULT_TITLE);
}

#[test]
fn test_close_last_tab_then_history_is_listed() {
    let (_dir, mut app, _host, window) = app_with_window();

    let tab = app.tab_manager.open_tab(window, "https://example.com").unwrap();
    app.navigation_started(tab, "https://example.com/");
    app.title_changed(tab, "Example Domain");
    app.load_finished(tab, "https://example.com/");

    app.tab_manager.close_active_tab(window).unwrap();
    assert_eq!(app.tab_manager.view_state(window), Some(ViewState::Welcome));

    let history = app.history_manager.list();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].url, "https://example.com/");
    assert_eq!(history[0].title, "Example Domain");
}

#[test]
fn test_close_in_welcome_is_noop() {
    let (_dir, mut app, _host, window) = app_with_window();
    assert!(!app.tab_manager.close_active_tab(window).unwrap());

    app.tab_manager.open_tab(window, "https://a.com").unwrap();
    app.tab_manager.activate_welcome(window).unwrap();
    assert!(!app.tab_manager.close_active_tab(window).unwrap());
    assert_eq!(app.tab_manager.tab_count(window), 1);
}

#[test]
fn test_next_and_previous_wrap_around() {
    let (_dir, mut app, _host, window) = app_with_window();
    let tabs = &mut app.tab_manager;
    for url in ["https://a.com", "https://b.com", "https://c.com"] {
        tabs.open_tab(window, url).unwrap();
    }
    assert_eq!(tabs.view_state(window), Some(ViewState::Tab(2)));

    tabs.next_tab(window).unwrap();
    assert_eq!(tabs.view_state(window), Some(ViewState::Tab(0)));
    tabs.previous_tab(window).unwrap();
    assert_eq!(tabs.view_state(window), Some(ViewState::Tab(2)));
    tabs.previous_tab(window).unwrap();
    assert_eq!(tabs.view_state(window), Some(ViewState::Tab(1)));
}

#[test]
fn test_next_and_previous_from_welcome() {
    let (_dir, mut app, _host, window) = app_with_window();
    let tabs = &mut app.tab_manager;
    assert!(!tabs.next_tab(window).unwrap());
    assert!(!tabs.previous_tab(window).unwrap());

    tabs.open_tab(window, "https://a.com").unwrap();
    tabs.open_tab(window, "https://b.com").unwrap();

    tabs.activate_welcome(window).unwrap();
    assert!(tabs.next_tab(window).unwrap());
    assert_eq!(tabs.view_state(window), Some(ViewState::Tab(0)));

    tabs.activate_welcome(window).unwrap();
    assert!(tabs.previous_tab(window).unwrap());
    assert_eq!(tabs.view_state(window), Some(ViewState::Tab(1)));
}

#[test]
fn test_single_tab_does_not_rotate() {
    let (_dir, mut app, _host, window) = app_with_window();
    app.tab_manager.open_tab(window, "https://a.com").unwrap();
    assert!(!app.tab_manager.next_tab(window).unwrap());
    assert!(!app.tab_manager.previous_tab(window).unwrap());
}

#[test]
fn test_single_tab_does_not_rotate_out_of_welcome() {
    let (_dir, mut app, host, window) = app_with_window();
    let welcome = app.tab_manager.welcome_surface(window).unwrap();
    app.tab_manager.open_tab(window, "https://a.com").unwrap();
    app.tab_manager.activate_welcome(window).unwrap();

    assert!(!app.tab_manager.next_tab(window).unwrap());
    assert!(!app.tab_manager.previous_tab(window).unwrap());
    assert_eq!(app.tab_manager.view_state(window), Some(ViewState::Welcome));
    assert_eq!(host.visible_surfaces(), vec![welcome]);
}

#[test]
fn test_activate_welcome_pushes_refresh() {
    let (_dir, mut app, host, window) = app_with_window();
    let welcome = app.tab_manager.welcome_surface(window).unwrap();
    app.tab_manager.open_tab(window, "https://a.com").unwrap();

    app.tab_manager.activate_welcome(window).unwrap();
    assert_eq!(host.visible_surfaces(), vec![welcome]);
    let pushes = host.pushes(welcome);
    assert_eq!(pushes.last().unwrap()["type"], "refreshHistory");
}

#[test]
fn test_activate_out_of_range_is_ignored() {
    let (_dir, mut app, _host, window) = app_with_window();
    app.tab_manager.open_tab(window, "https://a.com").unwrap();
    assert!(!app.tab_manager.activate_tab(window, 5).unwrap());
    assert_eq!(app.tab_manager.view_state(window), Some(ViewState::Tab(0)));
}

#[test]
fn test_show_active_surface_is_idempotent() {
    let (_dir, mut app, host, window) = app_with_window();
    let tab = app.tab_manager.open_tab(window, "https://a.com").unwrap();

    app.tab_manager.show_active_surface(window).unwrap();
    app.tab_manager.show_active_surface(window).unwrap();
    assert_eq!(host.visible_surfaces(), vec![tab]);
}

#[test]
fn test_unknown_window_is_an_error() {
    let (_dir, mut app, _host, _window) = app_with_window();
    let stranger = WindowId::new();
    assert!(matches!(
        app.tab_manager.open_tab(stranger, "https://a.com"),
        Err(TabError::WindowNotFound(_))
    ));
    assert_eq!(app.tab_manager.tab_count(stranger), 0);
    assert!(app.tab_manager.view_state(stranger).is_none());
}

#[test]
fn test_title_of_active_tab_drives_window_title() {
    let (_dir, mut app, host, window) = app_with_window();
    let a = app.tab_manager.open_tab(window, "https://a.com").unwrap();
    let b = app.tab_manager.open_tab(window, "https://b.com").unwrap();

    app.title_changed(b, "Page B");
    assert_eq!(host.title(window), "Page B");

    // Background tab titles do not leak into the window.
    app.title_changed(a, "Page A");
    assert_eq!(host.title(window), "Page B");

    app.tab_manager.activate_tab(window, 0).unwrap();
    assert_eq!(host.title(window), "Page A");

    app.tab_manager.activate_welcome(window).unwrap();
    assert_eq!(host.title(window), DEFAULT_TITLE);
}

#[test]
fn test_blank_title_falls_back_to_default() {
    let (_dir, mut app, host, window) = app_with_window();
    let tab = app.tab_manager.open_tab(window, "https://a.com").unwrap();
    app.title_changed(tab, "   ");
    assert_eq!(host.title(window), DEFAULT_TITLE);
}

#[test]
fn test_history_recorded_once_per_navigation() {
    let (_dir, mut app, _host, window) = app_with_window();
    let tab = app.tab_manager.open_tab(window, "https://a.com").unwrap();

    app.navigation_started(tab, "https://a.com/");
    app.load_finished(tab, "https://a.com/");
    app.history_manager.clear().unwrap();
    // Redirect or repeated completion of the same navigation.
    app.load_finished(tab, "https://a.com/home");
    assert!(app.history_manager.list().is_empty());

    app.navigation_started(tab, "https://a.com/next");
    app.load_finished(tab, "https://a.com/next");
    let history = app.history_manager.list();
    assert_eq!(history.len(), 1);
    // No title yet, so the URL stands in.
    assert_eq!(history[0].title, "https://a.com/next");
}

#[test]
fn test_welcome_page_is_never_recorded() {
    let (_dir, mut app, _host, window) = app_with_window();
    let welcome = app.tab_manager.welcome_surface(window).unwrap();

    app.navigation_started(welcome, WELCOME_URL);
    app.load_finished(welcome, WELCOME_URL);
    assert!(app.history_manager.list().is_empty());
}

#[test]
fn test_events_after_close_are_ignored() {
    let (_dir, mut app, host, window) = app_with_window();
    let tab = app.tab_manager.open_tab(window, "https://slow.example").unwrap();
    app.tab_manager.close_active_tab(window).unwrap();

    app.navigation_started(tab, "https://slow.example/");
    app.title_changed(tab, "Too late");
    app.load_finished(tab, "https://slow.example/");

    assert!(app.history_manager.list().is_empty());
    assert_eq!(host.title(window), DEFAULT_TITLE);
    assert!(!host.is_visible(tab));
    assert_eq!(app.tab_manager.surface_count(), 1);
}

#[test]
fn test_new_window_request_opens_tab_after_opener() {
    let (_dir, mut app, mut host, window) = app_with_window();
    let a = app.tab_manager.open_tab(window, "https://a.com").unwrap();
    let b = app.tab_manager.open_tab(window, "https://b.com").unwrap();

    let opened = app
        .new_window_requested(&mut host, a, "https://popup.example/")
        .unwrap()
        .unwrap();
    assert_eq!(app.tab_manager.tab_state(window).unwrap().surfaces(), &[a, opened, b]);
    assert_eq!(app.tab_manager.visible_surface(window), Some(opened));
    assert_eq!(app.window_count(), 1);
    assert!(host.log.borrow().external.is_empty());
}

#[test]
fn test_new_window_request_for_project_homepage_goes_external() {
    let (_dir, mut app, mut host, window) = app_with_window();
    let a = app.tab_manager.open_tab(window, "https://a.com").unwrap();

    let opened = app
        .new_window_requested(&mut host, a, "https://github.com/chromini/")
        .unwrap();
    assert!(opened.is_none());
    assert_eq!(app.tab_manager.tab_count(window), 1);
    assert_eq!(host.log.borrow().external, vec!["https://github.com/chromini/".to_string()]);
}

#[test]
fn test_non_web_links_go_external() {
    let (_dir, mut app, mut host, window) = app_with_window();
    let a = app.tab_manager.open_tab(window, "https://a.com").unwrap();

    app.new_window_requested(&mut host, a, "mailto:someone@example.com").unwrap();
    assert_eq!(app.tab_manager.tab_count(window), 1);
    assert_eq!(host.log.borrow().external.len(), 1);
}

#[test]
fn test_welcome_links_always_go_external() {
    let (_dir, mut app, mut host, window) = app_with_window();
    let welcome = app.tab_manager.welcome_surface(window).unwrap();

    let opened = app
        .new_window_requested(&mut host, welcome, "https://rust-lang.org")
        .unwrap();
    assert!(opened.is_none());
    assert_eq!(app.tab_manager.tab_count(window), 0);
    assert_eq!(host.log.borrow().external, vec!["https://rust-lang.org".to_string()]);
}

#[test]
fn test_context_menu_offers_link_actions_only_over_links() {
    let (_dir, mut app, _host, window) = app_with_window();
    let tab = app.tab_manager.open_tab(window, "https://a.com").unwrap();

    let has_open_link = |items: &[ContextMenuItem]| {
        items.iter().any(|item| {
            matches!(
                item,
                ContextMenuItem::Action { action: MenuAction::OpenLinkInNewTab, .. }
            )
        })
    };

    let plain = ContextParams { x: 1, y: 2, link_url: None };
    assert!(!has_open_link(&app.tab_manager.context_menu(tab, &plain).unwrap()));

    let over_link = ContextParams {
        link_url: Some("https://b.com".to_string()),
        ..plain
    };
    assert!(has_open_link(&app.tab_manager.context_menu(tab, &over_link).unwrap()));
}

#[test]
fn test_context_menu_actions_reach_the_surface() {
    let (_dir, mut app, host, window) = app_with_window();
    let tab = app.tab_manager.open_tab(window, "https://a.com").unwrap();
    let params = ContextParams { x: 10, y: 20, link_url: None };

    for action in [MenuAction::Back, MenuAction::Copy, MenuAction::InspectElement] {
        let outcome = app.tab_manager.on_context_menu_action(tab, action, &params).unwrap();
        assert_eq!(outcome, MenuOutcome::Handled);
    }

    let calls = host.calls(tab);
    assert!(calls.contains(&SurfaceCall::Back));
    assert!(calls.contains(&SurfaceCall::Edit(chromini::host::EditCommand::Copy)));
    assert!(calls.contains(&SurfaceCall::Inspect(10, 20)));
}

#[test]
fn test_context_menu_link_actions() {
    let (_dir, mut app, mut host, window) = app_with_window();
    let tab = app.tab_manager.open_tab(window, "https://a.com").unwrap();
    let params = ContextParams {
        x: 0,
        y: 0,
        link_url: Some("https://b.com/".to_string()),
    };

    app.context_menu_action(&mut host, tab, MenuAction::OpenLinkInNewTab, &params)
        .unwrap();
    assert_eq!(app.tab_manager.tab_count(window), 2);
    assert_eq!(app.tab_manager.view_state(window), Some(ViewState::Tab(1)));

    app.context_menu_action(&mut host, tab, MenuAction::OpenLinkInNewWindow, &params)
        .unwrap();
    assert_eq!(app.window_count(), 2);
    let second = app.focused_window().unwrap();
    assert_ne!(second, window);
    assert_eq!(app.tab_manager.view_state(second), Some(ViewState::Tab(0)));
}

#[test]
fn test_navigation_commands_need_an_active_tab() {
    let (_dir, mut app, host, window) = app_with_window();
    let welcome = app.tab_manager.welcome_surface(window).unwrap();
    assert!(!app.tab_manager.go_back(window).unwrap());
    assert!(!app.tab_manager.go_forward(window).unwrap());
    assert!(!app.tab_manager.reload_active(window).unwrap());
    assert!(!host.calls(welcome).iter().any(|c| matches!(c, SurfaceCall::Reload(_))));

    let tab = app.tab_manager.open_tab(window, "https://a.com").unwrap();
    assert!(app.tab_manager.go_back(window).unwrap());
    assert!(app.tab_manager.go_forward(window).unwrap());
    assert!(app.tab_manager.reload_active(window).unwrap());

    let calls = host.calls(tab);
    assert!(calls.contains(&SurfaceCall::Back));
    assert!(calls.contains(&SurfaceCall::Forward));
    assert!(calls.contains(&SurfaceCall::Reload(true)));
}

#[test]
fn test_devtools_on_welcome_follow_preferences() {
    let (_dir, mut app, _host, window) = app_with_window();
    assert!(!app.tab_manager.toggle_devtools(window).unwrap());

    app.tab_manager.open_tab(window, "https://a.com").unwrap();
    assert!(app.tab_manager.toggle_devtools(window).unwrap());
}

#[test]
fn test_toggle_fullscreen() {
    let (_dir, mut app, _host, window) = app_with_window();
    assert!(app.tab_manager.toggle_fullscreen(window).unwrap());
    assert!(!app.tab_manager.toggle_fullscreen(window).unwrap());
}

#[test]
fn test_resize_applies_bounds_to_every_surface() {
    let (_dir, mut app, host, window) = app_with_window();
    let tab = app.tab_manager.open_tab(window, "https://a.com").unwrap();
    let welcome = app.tab_manager.welcome_surface(window).unwrap();

    host.set_window_size(window, 500, 400);
    app.window_resized(window);

    let expected = SurfaceCall::Bounds(chromini::types::window::Bounds::filling(500, 400));
    assert_eq!(host.calls(tab).last(), Some(&expected));
    assert_eq!(host.calls(welcome).last(), Some(&expected));
}

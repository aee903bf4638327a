//! Integration tests for tui-forest.
//!
//! These tests exercise the public API from outside the crate: building
//! window forests, rendering them headlessly, and driving focus and widgets
//! with scripted keys.

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;

use tui_forest::config::{ConfigExt, ContainerConfig, GridConfig, MenuConfig, TextConfig};
use tui_forest::event::{Hooks, Key, KeyEvent};
use tui_forest::geometry::{Axis, Rect, Size};
use tui_forest::style::{Border, Color, Depth, Palette};
use tui_forest::testing::Pilot;
use tui_forest::tree::GridCell;
use tui_forest::widgets::{Input, List};
use tui_forest::{Owner, Tui, TuiConfig, WindowId};

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[test]
fn test_bordered_padded_box() {
    let mut pilot = Pilot::new(10, 5);
    let tui = pilot.tui_mut();
    let boxed = tui
        .create_container(
            Owner::Root,
            ContainerConfig::new()
                .with_border(Border::new(Depth::None))
                .with_padding(true)
                .with_rect(Rect::at(0, 0, 10, 5)),
        )
        .unwrap();
    tui.create_text(boxed, TextConfig::new("name")).unwrap();
    pilot.render().unwrap();

    insta::assert_snapshot!(pilot.screen_text(), @r"
    ┌────────┐
    │        │
    │  name  │
    │        │
    └────────┘
    ");
}

#[test]
fn test_grid_cells_render() {
    let mut pilot = Pilot::new(3, 2);
    let grid = pilot
        .tui_mut()
        .create_grid(Owner::Root, GridConfig::new(Size::new(3, 2)))
        .unwrap();
    for y in 0..2 {
        for x in 0..3 {
            let symbol = if (x + y) % 2 == 0 { '#' } else { '.' };
            pilot
                .tui_mut()
                .set_grid_cell(grid, x, y, GridCell::new(symbol, Color::INHERIT))
                .unwrap();
        }
    }
    pilot.render().unwrap();

    insta::assert_snapshot!(pilot.screen_text(), @r"
    #.#
    .#.
    ");
}

#[test]
fn test_color_inherits_from_menu_through_container() {
    let config = TuiConfig::new().with_color(Color::new(Palette::White, Palette::Black));
    let mut pilot = Pilot::with_config(config, 4, 1);
    let tui = pilot.tui_mut();
    let menu = tui.create_menu(MenuConfig::new().with_color(Color::fg(Palette::Red)));
    let panel = tui
        .create_container(menu, ContainerConfig::new().with_color(Color::bg(Palette::Blue)))
        .unwrap();
    let leaf = tui.create_text(panel, TextConfig::new("x")).unwrap();
    tui.set_active_menu(menu);
    pilot.render().unwrap();

    let expected = Color::new(Palette::Red, Palette::Blue);
    assert_eq!(pilot.tui().window(leaf).unwrap().frame().color, expected);
    assert_eq!(pilot.backend().color_at(0, 0), Some(expected));
    assert_eq!(
        pilot.backend().color_at(3, 0),
        Some(Color::new(Palette::Red, Palette::Black))
    );
}

#[test]
fn test_unwrappable_text_is_hidden() {
    let mut pilot = Pilot::new(4, 1);
    let id = pilot
        .tui_mut()
        .create_text(Owner::Root, TextConfig::new("toolong"))
        .unwrap();
    pilot.render().unwrap();
    assert!(!pilot.tui().is_visible(id));
    assert_eq!(pilot.screen_text(), "");
}

#[test]
fn test_atomic_child_that_does_not_fit_is_dropped() {
    let mut pilot = Pilot::new(6, 1);
    let tui = pilot.tui_mut();
    let row = tui
        .create_container(
            Owner::Root,
            ContainerConfig::new()
                .with_axis(Axis::Horizontal)
                .with_rect(Rect::at(0, 0, 4, 1)),
        )
        .unwrap();
    tui.create_text(row, TextConfig::new("ab")).unwrap();
    let wide = tui
        .create_text(row, TextConfig::new("cde").with_atomic(true))
        .unwrap();
    pilot.render().unwrap();

    assert!(!pilot.tui().is_visible(wide));
    assert_eq!(pilot.screen_text(), "ab");
}

// ---------------------------------------------------------------------------
// Focus and input
// ---------------------------------------------------------------------------

fn tabbing_config() -> TuiConfig {
    TuiConfig::new().with_hooks(Hooks::new().on_key(|tui, (), key| tui.tab_event(key)))
}

#[test]
fn test_form_with_two_inputs() {
    let mut pilot = Pilot::with_config(tabbing_config(), 12, 2);
    let tui = pilot.tui_mut();
    let menu = tui.create_menu(MenuConfig::new().with_name("main"));
    let form = tui
        .create_container(menu, ContainerConfig::new().with_name("form"))
        .unwrap();
    let first = tui
        .create_text(form, TextConfig::new("").with_name("first").with_interactive(true))
        .unwrap();
    let second = tui
        .create_text(form, TextConfig::new("").with_name("second").with_interactive(true))
        .unwrap();
    let first_input = Input::attach(tui, first, 8).unwrap();
    let second_input = Input::attach(tui, second, 8).unwrap();
    tui.set_active_menu(menu);
    pilot.render().unwrap();
    pilot.tui_mut().focus_path(menu, "form first").unwrap();

    pilot
        .run([
            Key::Char('a'),
            Key::Char('b'),
            Key::Tab,
            Key::Char('c'),
            Key::BackTab,
            Key::Backspace,
        ])
        .unwrap();

    assert_eq!(first_input.borrow().value(), "a");
    assert_eq!(second_input.borrow().value(), "c");
    assert_eq!(pilot.tui().active_window(), Some(first));
    assert_eq!(pilot.screen_text(), "a\nc");
}

#[test]
fn test_tab_round_trip_single_interactive_window() {
    let mut pilot = Pilot::with_config(tabbing_config(), 10, 2);
    let tui = pilot.tui_mut();
    let menu = tui.create_menu(MenuConfig::new());
    tui.create_text(menu, TextConfig::new("label")).unwrap();
    let only = tui
        .create_text(menu, TextConfig::new("field").with_interactive(true))
        .unwrap();
    tui.set_active_menu(menu);
    pilot.render().unwrap();
    pilot.tui_mut().set_active_window(only);

    pilot.press_key(Key::Tab).unwrap();
    pilot.press_key(Key::BackTab).unwrap();
    assert_eq!(pilot.tui().active_window(), Some(only));
}

#[test]
fn test_list_selection_follows_keys() {
    let mut pilot = Pilot::new(8, 3);
    let list = Rc::new(RefCell::new(List::new(Axis::Vertical)));
    let shared = list.clone();
    let highlight = move |tui: &mut Tui, _: WindowId, key: KeyEvent| {
        let mut list = shared.borrow_mut();
        if !list.event(tui, key) {
            return false;
        }
        for (index, &item) in list.items().iter().enumerate() {
            if let Some(window) = tui.window_mut(item) {
                window.color = if index == list.index() {
                    Color::bg(Palette::Blue)
                } else {
                    Color::INHERIT
                };
            }
        }
        true
    };

    let tui = pilot.tui_mut();
    let column = tui
        .create_container(
            Owner::Root,
            ContainerConfig::new().with_interactive(true).on_key(highlight),
        )
        .unwrap();
    let items: Vec<WindowId> = ["one", "two", "three"]
        .iter()
        .map(|label| tui.create_text(column, TextConfig::new(*label)).unwrap())
        .collect();
    for &item in &items {
        list.borrow_mut().push(item);
    }
    pilot.render().unwrap();
    pilot.tui_mut().set_active_window(column);

    assert!(pilot.press_key(Key::Down).unwrap());
    assert_eq!(list.borrow().selected(), Some(items[1]));
    assert_eq!(
        pilot.tui().window(items[1]).unwrap().frame().color,
        Color::bg(Palette::Blue)
    );

    pilot.tui_mut().window_mut(items[1]).unwrap().hidden = true;
    pilot.render().unwrap();
    assert!(list.borrow_mut().repair(pilot.tui()));
    assert_eq!(list.borrow().selected(), Some(items[2]));

    assert!(!pilot.press_key(Key::Down).unwrap());
    assert!(pilot.press_key(Key::Up).unwrap());
    assert_eq!(list.borrow().index(), 0);
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn test_drop_frees_every_window_children_first() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let record = |name: &'static str| {
        let log = log.clone();
        move |_: &mut Tui, _: WindowId| log.borrow_mut().push(name)
    };
    {
        let mut pilot = Pilot::new(10, 4);
        let tui = pilot.tui_mut();
        let menu = tui.create_menu(MenuConfig::new());
        tui.create_text(menu, TextConfig::new("m").on_free(record("menu text")))
            .unwrap();
        let parent = tui
            .create_container(Owner::Root, ContainerConfig::new().on_free(record("parent")))
            .unwrap();
        tui.create_text(parent, TextConfig::new("a").on_free(record("a"))).unwrap();
        tui.create_text(parent, TextConfig::new("b").on_free(record("b"))).unwrap();
        pilot.render().unwrap();
    }
    assert_eq!(*log.borrow(), vec!["menu text", "a", "b", "parent"]);
}

#[test]
fn test_resize_key_relayouts() {
    let mut pilot = Pilot::new(4, 1);
    let id = pilot
        .tui_mut()
        .create_text(Owner::Root, TextConfig::new("wide text"))
        .unwrap();
    pilot.render().unwrap();
    assert_eq!(pilot.tui().size(), Size::new(4, 1));

    pilot.backend_mut().set_size(Size::new(12, 2));
    pilot.run([Key::Resize]).unwrap();
    assert_eq!(pilot.tui().size(), Size::new(12, 2));
    assert!(pilot.tui().is_visible(id));
    assert_eq!(pilot.screen_text(), "wide text\n");
}

#[test]
fn test_stop_from_key_hook_ends_main_loop() {
    let config = TuiConfig::new().with_hooks(Hooks::new().on_key(|tui, (), key| {
        if key.code == Key::Char('q') {
            tui.stop();
            return true;
        }
        false
    }));
    let mut pilot = Pilot::with_config(config, 4, 1);
    pilot.run([Key::Char('x'), Key::Char('q'), Key::Char('y')]).unwrap();
    assert!(!pilot.tui().is_running());
    assert_eq!(pilot.backend().pending_keys(), 1);
}

#[test]
fn test_path_search_across_levels() {
    let mut pilot = Pilot::new(10, 3);
    let tui = pilot.tui_mut();
    let menu = tui.create_menu(MenuConfig::new());
    let form = tui
        .create_container(menu, ContainerConfig::new().with_name("form"))
        .unwrap();
    let name = tui
        .create_text(form, TextConfig::new("n").with_name("name"))
        .unwrap();
    let email = tui
        .create_text(form, TextConfig::new("e").with_name("email"))
        .unwrap();

    assert_eq!(tui.find_in_menu(menu, "form name"), Some(name));
    assert_eq!(tui.find_from(name, ". email"), Some(email));
    assert_eq!(tui.find_text(email, ". name"), Some(name));
    assert_eq!(tui.find(". form"), None);
    assert_eq!(tui.find_in_menu(menu, "form missing"), None);
}

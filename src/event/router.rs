//! Key routing along the focus chain.
//!
//! A key is offered to the active window, then to each of its enclosing
//! containers, then to the active menu and finally to the root. The first
//! hook returning `true` consumes it.

use tracing::trace;

use crate::app::Tui;
use crate::tree::WindowId;

use super::key::{Key, KeyEvent};

impl Tui {
    /// The active window followed by its enclosing containers.
    pub fn focus_chain(&self) -> Vec<WindowId> {
        self.active_window
            .map(|id| self.tree.ancestors(id))
            .unwrap_or_default()
    }

    /// Route `key` through the focus chain, the active menu and the root.
    /// Returns whether any hook consumed it.
    pub fn event(&mut self, key: KeyEvent) -> bool {
        for id in self.focus_chain() {
            if let Some(hook) = self.window_key_hook(id) {
                if hook(self, id, key) {
                    trace!(?key, ?id, "key consumed by window");
                    return true;
                }
            }
        }

        if let Some(menu) = self.active_menu {
            if let Some(hook) = self.menu_key_hook(menu) {
                if hook(self, menu, key) {
                    trace!(?key, ?menu, "key consumed by menu");
                    return true;
                }
            }
        }

        if self.root_key(key) {
            trace!(?key, "key consumed by root");
            return true;
        }
        false
    }

    /// Map Tab and BackTab to tab traversal. Other keys are not consumed.
    pub fn tab_event(&mut self, key: KeyEvent) -> bool {
        match key.code {
            Key::Tab => {
                self.tab_forward();
                true
            }
            Key::BackTab => {
                self.tab_backward();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use crate::app::{Owner, TuiConfig};
    use crate::backend::HeadlessBackend;
    use crate::config::{ConfigExt, ContainerConfig, MenuConfig, TextConfig};
    use crate::event::hooks::Hooks;
    use crate::geometry::Size;

    use super::*;

    type Log = Rc<RefCell<Vec<&'static str>>>;

    fn recorder(log: &Log, name: &'static str, consume: bool) -> impl Fn(&mut Tui, WindowId, KeyEvent) -> bool {
        let log = log.clone();
        move |_: &mut Tui, _: WindowId, _: KeyEvent| {
            log.borrow_mut().push(name);
            consume
        }
    }

    fn setup(log: &Log, consume_at: &'static str) -> Tui {
        let root_log = log.clone();
        let config = TuiConfig::new().with_hooks(Hooks::new().on_key(move |_, (), _| {
            root_log.borrow_mut().push("root");
            consume_at == "root"
        }));
        let mut tui = Tui::new(config, HeadlessBackend::new(Size::new(20, 6))).unwrap();

        let menu_log = log.clone();
        let menu = tui.create_menu(MenuConfig::new().with_hooks(Hooks::new().on_key(move |_, _, _| {
            menu_log.borrow_mut().push("menu");
            consume_at == "menu"
        })));
        let outer = tui
            .create_container(menu, ContainerConfig::new().on_key(recorder(log, "outer", consume_at == "outer")))
            .unwrap();
        let inner = tui
            .create_container(outer, ContainerConfig::new().on_key(recorder(log, "inner", consume_at == "inner")))
            .unwrap();
        let leaf = tui
            .create_text(
                inner,
                TextConfig::new("leaf")
                    .with_interactive(true)
                    .on_key(recorder(log, "leaf", consume_at == "leaf")),
            )
            .unwrap();
        tui.set_active_menu(menu);
        tui.render().unwrap();
        tui.set_active_window(leaf);
        tui
    }

    #[test]
    fn key_bubbles_through_every_level() {
        let log = Log::default();
        let mut tui = setup(&log, "nobody");
        assert!(!tui.event(KeyEvent::from(Key::Char('x'))));
        assert_eq!(*log.borrow(), vec!["leaf", "inner", "outer", "menu", "root"]);
    }

    #[test]
    fn first_consumer_stops_propagation() {
        let log = Log::default();
        let mut tui = setup(&log, "inner");
        assert!(tui.event(KeyEvent::from(Key::Enter)));
        assert_eq!(*log.borrow(), vec!["leaf", "inner"]);

        let log = Log::default();
        let mut tui = setup(&log, "menu");
        assert!(tui.event(KeyEvent::from(Key::Enter)));
        assert_eq!(*log.borrow(), vec!["leaf", "inner", "outer", "menu"]);
    }

    #[test]
    fn no_focus_goes_to_menu_and_root() {
        let log = Log::default();
        let mut tui = setup(&log, "nobody");
        tui.clear_active_window();
        tui.event(KeyEvent::from(Key::Escape));
        assert_eq!(*log.borrow(), vec!["menu", "root"]);
    }

    #[test]
    fn hook_can_remove_its_own_window() {
        let mut tui = Tui::new(TuiConfig::new(), HeadlessBackend::new(Size::new(20, 6))).unwrap();
        let id = tui
            .create_text(
                Owner::Root,
                TextConfig::new("bye").with_interactive(true).on_key(|tui, id, _| {
                    tui.remove_window(id).unwrap();
                    true
                }),
            )
            .unwrap();
        tui.render().unwrap();
        tui.set_active_window(id);
        assert!(tui.event(KeyEvent::from(Key::Enter)));
        assert!(tui.window(id).is_none());
        assert_eq!(tui.active_window(), None);
    }

    #[test]
    fn tab_event_moves_focus() {
        let mut tui = Tui::new(TuiConfig::new(), HeadlessBackend::new(Size::new(20, 6))).unwrap();
        let a = tui
            .create_text(Owner::Root, TextConfig::new("a").with_interactive(true))
            .unwrap();
        let b = tui
            .create_text(Owner::Root, TextConfig::new("b").with_interactive(true))
            .unwrap();
        tui.render().unwrap();
        tui.set_active_window(a);

        assert!(tui.tab_event(KeyEvent::from(Key::Tab)));
        assert_eq!(tui.active_window(), Some(b));
        assert!(tui.tab_event(KeyEvent::from(Key::BackTab)));
        assert_eq!(tui.active_window(), Some(a));
        assert!(!tui.tab_event(KeyEvent::from(Key::Char('t'))));
    }

    #[test]
    fn focus_chain_lists_leaf_first() {
        let log = Log::default();
        let tui = setup(&log, "nobody");
        let chain = tui.focus_chain();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.first().copied(), tui.active_window());
    }
}

//! Lifecycle hooks attached to windows, menus and the root.
//!
//! Hooks are reference-counted closures so the router can clone one out of the
//! tree and call it with `&mut Tui`, letting the hook mutate anything,
//! including the window it belongs to.
//!
//! | Hook     | Window | Menu | Root |
//! |----------|--------|------|------|
//! | `init`   | after the window is attached | after creation | after construction |
//! | `enter`  | on gaining focus | on becoming active | |
//! | `exit`   | on losing focus | on becoming inactive | |
//! | `update` | before each size pass | | |
//! | `render` | before the window is drawn | | |
//! | `key`    | key bubbling | after the window chain | last |
//! | `free`   | before removal, children first | | |

use std::fmt;
use std::rc::Rc;

use crate::app::Tui;

use super::key::KeyEvent;

/// A hook receiving the owner's handle.
pub type Hook<Id> = Rc<dyn Fn(&mut Tui, Id)>;

/// A key hook; returns `true` when it consumed the event.
pub type KeyHook<Id> = Rc<dyn Fn(&mut Tui, Id, KeyEvent) -> bool>;

/// The set of optional hooks for one owner.
pub struct Hooks<Id> {
    pub init: Option<Hook<Id>>,
    pub enter: Option<Hook<Id>>,
    pub exit: Option<Hook<Id>>,
    pub update: Option<Hook<Id>>,
    pub render: Option<Hook<Id>>,
    pub free: Option<Hook<Id>>,
    pub key: Option<KeyHook<Id>>,
}

impl<Id> Default for Hooks<Id> {
    fn default() -> Self {
        Self {
            init: None,
            enter: None,
            exit: None,
            update: None,
            render: None,
            free: None,
            key: None,
        }
    }
}

impl<Id> Clone for Hooks<Id> {
    fn clone(&self) -> Self {
        Self {
            init: self.init.clone(),
            enter: self.enter.clone(),
            exit: self.exit.clone(),
            update: self.update.clone(),
            render: self.render.clone(),
            free: self.free.clone(),
            key: self.key.clone(),
        }
    }
}

impl<Id> fmt::Debug for Hooks<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("init", &self.init.is_some())
            .field("enter", &self.enter.is_some())
            .field("exit", &self.exit.is_some())
            .field("update", &self.update.is_some())
            .field("render", &self.render.is_some())
            .field("free", &self.free.is_some())
            .field("key", &self.key.is_some())
            .finish()
    }
}

impl<Id> Hooks<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_init(mut self, f: impl Fn(&mut Tui, Id) + 'static) -> Self {
        self.init = Some(Rc::new(f));
        self
    }

    pub fn on_enter(mut self, f: impl Fn(&mut Tui, Id) + 'static) -> Self {
        self.enter = Some(Rc::new(f));
        self
    }

    pub fn on_exit(mut self, f: impl Fn(&mut Tui, Id) + 'static) -> Self {
        self.exit = Some(Rc::new(f));
        self
    }

    pub fn on_update(mut self, f: impl Fn(&mut Tui, Id) + 'static) -> Self {
        self.update = Some(Rc::new(f));
        self
    }

    pub fn on_render(mut self, f: impl Fn(&mut Tui, Id) + 'static) -> Self {
        self.render = Some(Rc::new(f));
        self
    }

    pub fn on_free(mut self, f: impl Fn(&mut Tui, Id) + 'static) -> Self {
        self.free = Some(Rc::new(f));
        self
    }

    pub fn on_key(mut self, f: impl Fn(&mut Tui, Id, KeyEvent) -> bool + 'static) -> Self {
        self.key = Some(Rc::new(f));
        self
    }
}

use std::sync::{Arc, Mutex};
use lazy_static::lazy_static;
use crate::lock;

#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum Severity {
    Notice,
    Warning,
    Error
}

#[derive(Copy,Clone,Debug,PartialEq,Eq)]
pub enum Verbosity {
    Noisy,
    Normal,
    Quiet
}

impl Verbosity {
    pub fn from_string(str: &str) -> Option<Verbosity> {
        match str {
            "quiet" => Some(Verbosity::Quiet),
            "noisy" => Some(Verbosity::Noisy),
            "normal" => Some(Verbosity::Normal),
            _ => None
        }
    }

    fn level(&self) -> usize {
        match self {
            Verbosity::Quiet => 0,
            Verbosity::Normal => 1,
            Verbosity::Noisy => 2
        }
    }
}

type Printer = Box<dyn FnMut(&Severity,&str) + 'static + Send>;

lazy_static! {
    static ref VERBOSITY : Arc<Mutex<Verbosity>> = Arc::new(Mutex::new(Verbosity::Normal));
    static ref PRINTER : Arc<Mutex<Option<Printer>>> = Arc::new(Mutex::new(None));
}

pub fn set_verbosity(verbosity: Verbosity) {
    *lock!(VERBOSITY) = verbosity;
}

/* With no printer installed messages go nowhere. Native callers (tests, tools) install one that
 * writes to stderr, the web adapter installs the browser console.
 */
pub fn set_printer<F>(cb: F) where F: FnMut(&Severity,&str) + 'static + Send {
    *lock!(PRINTER) = Some(Box::new(cb));
}

pub fn clear_printer() {
    *lock!(PRINTER) = None;
}

pub fn has_printer() -> bool { lock!(PRINTER).is_some() }

/* Don't call directly, use macros */
pub fn print(verbosity: &Verbosity, severity: &Severity, message: &str) {
    if verbosity.level() > lock!(VERBOSITY).level() { return; }
    if let Some(printer) = lock!(PRINTER).as_mut() {
        printer(severity,message);
    }
}

#[macro_export]
macro_rules! do_log {
    ($verb:tt,$sev:tt,$($arg:tt)*) => {
        $crate::console::print(
            &$crate::console::Verbosity::$verb,
            &$crate::console::Severity::$sev,
            &std::format!($($arg)*)
        )
    }
}

#[macro_export]
macro_rules! log { ($($arg:tt)*) => { $crate::do_log!(Normal,Notice,$($arg)*) } }
#[macro_export]
macro_rules! log_important { ($($arg:tt)*) => { $crate::do_log!(Quiet,Notice,$($arg)*) } }
#[macro_export]
macro_rules! log_extra { ($($arg:tt)*) => { $crate::do_log!(Noisy,Notice,$($arg)*) } }
#[macro_export]
macro_rules! warn { ($($arg:tt)*) => { $crate::do_log!(Normal,Warning,$($arg)*) } }
#[macro_export]
macro_rules! warn_important { ($($arg:tt)*) => { $crate::do_log!(Quiet,Warning,$($arg)*) } }
#[macro_export]
macro_rules! warn_extra { ($($arg:tt)*) => { $crate::do_log!(Noisy,Warning,$($arg)*) } }
#[macro_export]
macro_rules! error { ($($arg:tt)*) => { $crate::do_log!(Normal,Error,$($arg)*) } }
#[macro_export]
macro_rules! error_important { ($($arg:tt)*) => { $crate::do_log!(Quiet,Error,$($arg)*) } }

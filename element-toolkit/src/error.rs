use std::fmt;
use crate::{ error, error_important, log_extra };

#[derive(Clone,Debug,PartialEq,Eq)]
pub enum ErrorType {
    DuplicateRegistration, // Element name already bound. Fatal to the define call
    ContentProduction,     // Content routine rejected. Recovered by the instance
    StaleTransition,       // Result arrived for a connection which was abandoned
    HostFailure,           // Rendering host refused an operation
    BadConfig              // Unknown configuration key or unparseable value
}

#[derive(Clone,Debug,PartialEq,Eq)]
pub struct Error {
    pub error_type: ErrorType,
    pub message: String
}

macro_rules! error_ctor {
    ($name:ident,$rname:ident,$type:tt) => {
        pub fn $name(text: &str) -> Error {
            crate::error::Error {
                error_type: ErrorType::$type,
                message: text.to_string()
            }
        }

        pub fn $rname<T, E: std::fmt::Debug>(data: Result<T,E>, text: &str) -> Result<T,Error> {
            data.map_err(|e| {
                crate::error::Error::$name(&format!("{}: {:?}",text,e))
            })
        }
    }
}

impl Error {
    error_ctor!(duplicate,duplicate_r,DuplicateRegistration);
    error_ctor!(content,content_r,ContentProduction);
    error_ctor!(stale,stale_r,StaleTransition);
    error_ctor!(host,host_r,HostFailure);
    error_ctor!(config,config_r,BadConfig);

    pub fn is_stale(&self) -> bool { self.error_type == ErrorType::StaleTransition }

    /* Terminal handling for errors with nobody left to return them to. */
    pub fn report(&self) {
        match self.error_type {
            ErrorType::StaleTransition => { log_extra!("discarded: {}",self); },
            ErrorType::HostFailure => { error_important!("{}",self); },
            _ => { error!("{}",self); }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.error_type {
            ErrorType::DuplicateRegistration => "duplicate registration",
            ErrorType::ContentProduction => "content production failed",
            ErrorType::StaleTransition => "stale transition",
            ErrorType::HostFailure => "host failure",
            ErrorType::BadConfig => "bad config"
        };
        write!(f,"{}: {}",prefix,self.message)
    }
}

impl std::error::Error for Error {}

pub fn err_report(value: Result<(),Error>) {
    if let Err(e) = value {
        e.report();
    }
}

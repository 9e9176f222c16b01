use lazy_static::lazy_static;
use element_config::{ Config, ConfigKeyInfo, ConfigValue };
use element_toolkit::console::Verbosity;
use element_toolkit::error::Error;

/// What a failed instance renders into its boundary. Failures are logged whatever this says.
#[derive(Clone,Copy,Debug,PartialEq,Eq,Hash)]
pub enum FailureDisplay {
    /// Generic error state only.
    Message,
    /// The routine's own error markup, or the generic error state if it supplied none.
    Fragment,
    /// Generic error state followed by the routine's error markup, if any.
    Both
}

/// What reinsertion of a disconnected instance does.
#[derive(Clone,Copy,Debug,PartialEq,Eq,Hash)]
pub enum ReconnectPolicy {
    /// Run the content routine again and re-render on success.
    Refresh,
    /// Return to the last settled outcome without running the routine or re-mounting.
    Reuse
}

#[derive(Clone,Debug,PartialEq,Eq,Hash)]
pub enum ElementConfigKey {
    FailureDisplay,
    Reconnect,
    Verbosity
}

#[derive(Clone,Debug,PartialEq)]
pub enum ElementConfigValue {
    FailureDisplay(FailureDisplay),
    Reconnect(ReconnectPolicy),
    Verbosity(Verbosity)
}

lazy_static! {
    static ref CONFIG_CONFIG : Vec<ConfigKeyInfo<'static,ElementConfigKey,ElementConfigValue>> = {
        vec![
            ConfigKeyInfo { key: ElementConfigKey::FailureDisplay, name: "failure.display", default: &ElementConfigValue::FailureDisplay(FailureDisplay::Both) },
            ConfigKeyInfo { key: ElementConfigKey::Reconnect, name: "reconnect", default: &ElementConfigValue::Reconnect(ReconnectPolicy::Refresh) },
            ConfigKeyInfo { key: ElementConfigKey::Verbosity, name: "verbosity", default: &ElementConfigValue::Verbosity(Verbosity::Normal) },
        ]};
}

fn string_to_failure_display(value_str: &str) -> Result<FailureDisplay,String> {
    match value_str {
        "message" => Ok(FailureDisplay::Message),
        "fragment" => Ok(FailureDisplay::Fragment),
        "both" => Ok(FailureDisplay::Both),
        _ => Err(format!("expected message, fragment or both, not '{}'",value_str))
    }
}

fn string_to_reconnect(value_str: &str) -> Result<ReconnectPolicy,String> {
    match value_str {
        "refresh" => Ok(ReconnectPolicy::Refresh),
        "reuse" => Ok(ReconnectPolicy::Reuse),
        _ => Err(format!("expected refresh or reuse, not '{}'",value_str))
    }
}

impl ConfigValue for ElementConfigValue {
    fn parse(&self, value_str: &str) -> Result<ElementConfigValue,String> {
        Ok(match self {
            ElementConfigValue::FailureDisplay(_) => ElementConfigValue::FailureDisplay(string_to_failure_display(value_str)?),
            ElementConfigValue::Reconnect(_) => ElementConfigValue::Reconnect(string_to_reconnect(value_str)?),
            ElementConfigValue::Verbosity(_) => {
                ElementConfigValue::Verbosity(Verbosity::from_string(value_str).ok_or_else(|| {
                    format!("expected quiet, normal or noisy, not '{}'",value_str)
                })?)
            }
        })
    }
}

pub struct ElementConfig(Config<'static,ElementConfigKey,ElementConfigValue>);

impl ElementConfig {
    pub fn new() -> ElementConfig {
        ElementConfig(Config::new(&CONFIG_CONFIG))
    }

    pub fn from_pairs(pairs: &[(&str,&str)]) -> Result<ElementConfig,Error> {
        let mut out = ElementConfig::new();
        for (key,value) in pairs {
            out.set(key,value)?;
        }
        Ok(out)
    }

    pub fn set(&mut self, key_str: &str, value: &str) -> Result<(),Error> {
        self.0.set(key_str,value).map_err(|e| Error::config(&e.to_string()))
    }

    fn get(&self, key: &ElementConfigKey) -> Result<&ElementConfigValue,Error> {
        self.0.get(key).map_err(|e| Error::config(&e.to_string()))
    }

    pub fn failure_display(&self) -> Result<FailureDisplay,Error> {
        match self.get(&ElementConfigKey::FailureDisplay)? {
            ElementConfigValue::FailureDisplay(x) => Ok(*x),
            _ => Err(Error::config("failure.display holds wrong type"))
        }
    }

    pub fn reconnect(&self) -> Result<ReconnectPolicy,Error> {
        match self.get(&ElementConfigKey::Reconnect)? {
            ElementConfigValue::Reconnect(x) => Ok(*x),
            _ => Err(Error::config("reconnect holds wrong type"))
        }
    }

    /* The console is shared with the rest of the page, so only an explicit setting changes it. */
    pub fn verbosity_if_set(&self) -> Result<Option<Verbosity>,Error> {
        if self.0.is_set(&ElementConfigKey::Verbosity) {
            Ok(Some(self.verbosity()?))
        } else {
            Ok(None)
        }
    }

    pub fn verbosity(&self) -> Result<Verbosity,Error> {
        match self.get(&ElementConfigKey::Verbosity)? {
            ElementConfigValue::Verbosity(x) => Ok(*x),
            _ => Err(Error::config("verbosity holds wrong type"))
        }
    }
}

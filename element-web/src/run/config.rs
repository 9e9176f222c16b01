use lazy_static::lazy_static;
use web_sys::ShadowRootMode;
use element_config::{ Config, ConfigKeyInfo, ConfigValue };
use element_toolkit::error::Error;

#[derive(Clone,Copy,Debug,PartialEq,Eq,Hash)]
pub enum ShadowMode {
    Open,
    Closed
}

impl ShadowMode {
    pub(crate) fn to_web(&self) -> ShadowRootMode {
        match self {
            ShadowMode::Open => ShadowRootMode::Open,
            ShadowMode::Closed => ShadowRootMode::Closed
        }
    }
}

#[derive(Clone,Debug,PartialEq,Eq,Hash)]
pub enum WebConfigKey {
    ShadowMode,
    ConsoleMaxPerInterval,
    ConsoleInterval
}

#[derive(Clone,Debug,PartialEq)]
pub enum WebConfigValue {
    ShadowMode(ShadowMode),
    Count(u32),
    Seconds(f64)
}

lazy_static! {
    static ref WEB_CONFIG_CONFIG : Vec<ConfigKeyInfo<'static,WebConfigKey,WebConfigValue>> = {
        vec![
            ConfigKeyInfo { key: WebConfigKey::ShadowMode, name: "shadow.mode", default: &WebConfigValue::ShadowMode(ShadowMode::Closed) },
            ConfigKeyInfo { key: WebConfigKey::ConsoleMaxPerInterval, name: "console.max-per-interval", default: &WebConfigValue::Count(100) },
            ConfigKeyInfo { key: WebConfigKey::ConsoleInterval, name: "console.interval", default: &WebConfigValue::Seconds(5.) },
        ]};
}

impl ConfigValue for WebConfigValue {
    fn parse(&self, value_str: &str) -> Result<WebConfigValue,String> {
        Ok(match self {
            WebConfigValue::ShadowMode(_) => {
                WebConfigValue::ShadowMode(match value_str {
                    "open" => ShadowMode::Open,
                    "closed" => ShadowMode::Closed,
                    _ => { return Err(format!("expected open or closed, not '{}'",value_str)); }
                })
            },
            WebConfigValue::Count(_) => WebConfigValue::Count(value_str.parse().map_err(|e| format!("{}",e))?),
            WebConfigValue::Seconds(_) => {
                let value : f64 = value_str.parse().map_err(|e| format!("{}",e))?;
                if !(value > 0.) {
                    return Err(format!("interval must be positive, not '{}'",value_str));
                }
                WebConfigValue::Seconds(value)
            }
        })
    }
}

pub struct WebConfig(Config<'static,WebConfigKey,WebConfigValue>);

impl WebConfig {
    pub fn new() -> WebConfig {
        WebConfig(Config::new(&WEB_CONFIG_CONFIG))
    }

    pub fn is_key(&self, key_str: &str) -> bool { self.0.is_key(key_str) }

    pub fn set(&mut self, key_str: &str, value: &str) -> Result<(),Error> {
        self.0.set(key_str,value).map_err(|e| Error::config(&e.to_string()))
    }

    /* false if the page left the console alone */
    pub fn console_configured(&self) -> bool {
        self.0.is_set(&WebConfigKey::ConsoleMaxPerInterval) || self.0.is_set(&WebConfigKey::ConsoleInterval)
    }

    fn get(&self, key: &WebConfigKey) -> Result<&WebConfigValue,Error> {
        self.0.get(key).map_err(|e| Error::config(&e.to_string()))
    }

    pub fn shadow_mode(&self) -> Result<ShadowMode,Error> {
        match self.get(&WebConfigKey::ShadowMode)? {
            WebConfigValue::ShadowMode(x) => Ok(*x),
            _ => Err(Error::config("shadow.mode holds wrong type"))
        }
    }

    pub fn console_limits(&self) -> Result<(u32,f64),Error> {
        let max = match self.get(&WebConfigKey::ConsoleMaxPerInterval)? {
            WebConfigValue::Count(x) => *x,
            _ => { return Err(Error::config("console.max-per-interval holds wrong type")); }
        };
        let interval = match self.get(&WebConfigKey::ConsoleInterval)? {
            WebConfigValue::Seconds(x) => *x,
            _ => { return Err(Error::config("console.interval holds wrong type")); }
        };
        Ok((max,interval))
    }
}

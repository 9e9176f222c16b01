use std::fmt::{ self, Debug };

#[derive(Clone,Debug,PartialEq,Eq,Hash)]
pub enum ConfigError {
    UnknownKey(String),
    MissingKey(String),
    BadValue(String,String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownKey(k) => write!(f,"unknown config key '{}'",k),
            ConfigError::MissingKey(k) => write!(f,"config key {} is not in the table",k),
            ConfigError::BadValue(k,e) => write!(f,"bad value for config key '{}': {}",k,e)
        }
    }
}

/* Values parse relative to their default, so the default decides the type of the key. */
pub trait ConfigValue : Sized {
    fn parse(&self, value_str: &str) -> Result<Self,String>;
}

pub struct ConfigKeyInfo<'a,K,V> {
    pub key: K,
    pub name: &'a str,
    pub default: &'a V
}

struct ConfigEntry<'a,K,V> {
    key: K,
    name: String,
    default: &'a V,
    value: Option<V>
}

/// String-keyed settings with typed defaults. Tables are a handful of keys, so lookup is a scan.
pub struct Config<'a,K,V> {
    entries: Vec<ConfigEntry<'a,K,V>>
}

impl<'a,K: Debug+Clone+PartialEq, V: ConfigValue> Config<'a,K,V> {
    pub fn new(info: &[ConfigKeyInfo<'a,K,V>]) -> Config<'a,K,V> {
        Config {
            entries: info.iter().map(|info| ConfigEntry {
                key: info.key.clone(),
                name: info.name.to_string(),
                default: info.default,
                value: None
            }).collect()
        }
    }

    fn by_name(&mut self, key_str: &str) -> Option<&mut ConfigEntry<'a,K,V>> {
        self.entries.iter_mut().find(|x| x.name == key_str)
    }

    fn by_key(&self, key: &K) -> Option<&ConfigEntry<'a,K,V>> {
        self.entries.iter().find(|x| &x.key == key)
    }

    /* A rejected value leaves the previous one in place. */
    pub fn set(&mut self, key_str: &str, value_str: &str) -> Result<(),ConfigError> {
        let entry = self.by_name(key_str).ok_or_else(|| ConfigError::UnknownKey(key_str.to_string()))?;
        let value = entry.default.parse(value_str).map_err(|e| ConfigError::BadValue(key_str.to_string(),e))?;
        entry.value = Some(value);
        Ok(())
    }

    pub fn is_key(&self, key_str: &str) -> bool { self.entries.iter().any(|x| x.name == key_str) }

    /* true only once a value has been set, whatever the default */
    pub fn is_set(&self, key: &K) -> bool { self.by_key(key).map(|x| x.value.is_some()).unwrap_or(false) }

    pub fn try_get(&self, key: &K) -> Option<&V> {
        self.by_key(key).map(|x| x.value.as_ref().unwrap_or(x.default))
    }

    pub fn get(&self, key: &K) -> Result<&V,ConfigError> {
        self.try_get(key).ok_or_else(|| ConfigError::MissingKey(format!("{:?}",key)))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Clone,Debug,PartialEq,Eq,Hash)]
    enum TestKey { Mode, Limit }

    #[derive(Clone,Debug,PartialEq)]
    enum TestValue { Word(&'static [&'static str]), Chosen(String), Number(u32) }

    impl ConfigValue for TestValue {
        fn parse(&self, value_str: &str) -> Result<TestValue,String> {
            match self {
                TestValue::Word(allowed) => {
                    if allowed.contains(&value_str) {
                        Ok(TestValue::Chosen(value_str.to_string()))
                    } else {
                        Err(format!("expected one of {}",allowed.join(", ")))
                    }
                },
                TestValue::Chosen(_) => Ok(TestValue::Chosen(value_str.to_string())),
                TestValue::Number(_) => value_str.parse().map(TestValue::Number).map_err(|e| format!("{}",e))
            }
        }
    }

    static MODE_DEFAULT : TestValue = TestValue::Word(&["open","closed"]);
    static LIMIT_DEFAULT : TestValue = TestValue::Number(3);

    fn make_config() -> Config<'static,TestKey,TestValue> {
        Config::new(&[
            ConfigKeyInfo { key: TestKey::Mode, name: "mode", default: &MODE_DEFAULT },
            ConfigKeyInfo { key: TestKey::Limit, name: "limit", default: &LIMIT_DEFAULT },
        ])
    }

    #[test]
    fn test_defaults_and_overrides() {
        let mut config = make_config();
        assert!(!config.is_set(&TestKey::Mode));
        assert_eq!(&MODE_DEFAULT,config.get(&TestKey::Mode).ok().unwrap());
        assert_eq!(&TestValue::Number(3),config.get(&TestKey::Limit).ok().unwrap());
        config.set("mode","open").ok().unwrap();
        config.set("limit","12").ok().unwrap();
        assert_eq!(&TestValue::Chosen("open".to_string()),config.get(&TestKey::Mode).ok().unwrap());
        assert_eq!(&TestValue::Number(12),config.get(&TestKey::Limit).ok().unwrap());
        assert!(config.is_set(&TestKey::Limit));
        assert!(config.is_key("mode"));
        assert!(!config.is_key("colour"));
    }

    #[test]
    fn test_bad_keys_and_values() {
        let mut config = make_config();
        assert_eq!(Err(ConfigError::UnknownKey("colour".to_string())),config.set("colour","red"));
        match config.set("mode","ajar") {
            Err(ConfigError::BadValue(k,_)) => { assert_eq!("mode",k); },
            x => { panic!("unexpected {:?}",x); }
        }
        assert!(config.set("limit","many").is_err());
        assert!(!config.is_set(&TestKey::Limit));
        assert_eq!(&TestValue::Number(3),config.get(&TestKey::Limit).ok().unwrap());
        config.set("limit","4").ok().unwrap();
        assert!(config.set("limit","-4").is_err());
        assert_eq!(&TestValue::Number(4),config.get(&TestKey::Limit).ok().unwrap());
    }
}

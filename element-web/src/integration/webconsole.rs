use std::sync::{ Arc, Mutex };
use js_sys::Date;
use web_sys::console;
use element_toolkit::console::{ Severity, set_printer };
use element_toolkit::lock;

/* Counts messages per interval of wall-clock time. Anything past the limit is dropped and
 * summarised once the next interval begins.
 */
struct RateLimit {
    this_interval: f64,
    num_this_interval: u32,
    max_per_interval: u32,
    interval: f64
}

impl RateLimit {
    fn new(max_per_interval: u32, interval: f64) -> RateLimit {
        RateLimit {
            this_interval: 0.,
            num_this_interval: 0,
            max_per_interval,
            interval: interval * 1000.
        }
    }

    /* Returns a summary of what was dropped, if anything, when a new interval begins. */
    fn admit(&mut self, now: f64) -> (bool,Option<String>) {
        let now = (now/self.interval).floor();
        let mut summary = None;
        if now > self.this_interval {
            if self.num_this_interval > self.max_per_interval {
                summary = Some(format!("... and {} more messages in the last {}s",
                    self.num_this_interval-self.max_per_interval,self.interval/1000.));
            }
            self.this_interval = now;
            self.num_this_interval = 0;
        }
        self.num_this_interval += 1;
        (self.num_this_interval <= self.max_per_interval,summary)
    }
}

fn write(severity: &Severity, message: &str) {
    match severity {
        Severity::Notice => console::log_1(&message.into()),
        Severity::Warning => console::warn_1(&message.into()),
        Severity::Error => console::error_1(&message.into())
    }
}

#[derive(Clone)]
pub struct WebConsole(Arc<Mutex<RateLimit>>);

impl WebConsole {
    pub fn new(max_per_interval: u32, interval: f64) -> WebConsole {
        WebConsole(Arc::new(Mutex::new(RateLimit::new(max_per_interval,interval))))
    }

    pub fn message(&self, severity: &Severity, message: &str) {
        let (admit,summary) = lock!(self.0).admit(Date::now());
        if let Some(summary) = summary {
            write(&Severity::Notice,&summary);
        }
        if admit {
            write(severity,message);
        }
    }

    /* Replaces whatever printer the toolkit console had. */
    pub fn install(&self) {
        let console = self.clone();
        set_printer(move |severity,message| console.message(severity,message));
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_rate_limit() {
        let mut limit = RateLimit::new(2,1.);
        assert_eq!((true,None),limit.admit(1000.));
        assert_eq!((true,None),limit.admit(1100.));
        assert_eq!((false,None),limit.admit(1200.));
        assert_eq!((false,None),limit.admit(1900.));
        let (admit,summary) = limit.admit(2000.);
        assert!(admit);
        assert_eq!(Some("... and 2 more messages in the last 1s".to_string()),summary);
        assert_eq!((true,None),limit.admit(3500.));
    }
}

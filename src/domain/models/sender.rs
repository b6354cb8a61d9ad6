use crate::configuration::Config;
use crate::configuration::ConfigKey;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl ToString for Sender {
    fn to_string(&self) -> String {
        match self {
            Sender::User => return Config::get(ConfigKey::Username),
            Sender::Bot => return String::from("FloatChat"),
        }
    }
}

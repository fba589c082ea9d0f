use std::fmt;

use crate::matcher::Matcher;
use crate::schedule::Schedule;

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Static { value, .. } => write!(f, "{value}"),
            Matcher::Range { lo, hi, .. } => write!(f, "{lo}-{hi}"),
            Matcher::Step { stride, .. } => write!(f, "*/{stride}"),
            Matcher::Wildcard { .. } => write!(f, "*"),
            Matcher::Composite { members, .. } => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{member}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.minute, self.hour, self.day_of_month, self.month, self.day_of_week
        )
    }
}

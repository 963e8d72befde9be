//! Snooper: wires configured rules into a model as prefix observers.
//!
//! The default rules reproduce the classic demo: `"Oh Yes!"` for queries
//! mentioning *friend*, `"So long"` for queries over 60 characters.

use snoop_core::config::{Config, RuleConfig};
use snoop_core::{ConfigError, Filter, OutputFormat, PrefixObserver, Sink};
use snoop_feeds::QuerySource;

use crate::model::SearchModel;

pub struct Snooper;

impl Snooper {
    /// Register one [`PrefixObserver`] per rule, in rule order. All filters
    /// are built before anything is registered, so a bad rule leaves the
    /// model untouched.
    pub fn attach<S: QuerySource>(
        model: &mut SearchModel<S>,
        rules: &[RuleConfig],
        sink: &Sink,
        format: OutputFormat,
    ) -> Result<(), ConfigError> {
        let filters = rules
            .iter()
            .map(|rule| rule.filter.build(&rule.name))
            .collect::<Result<Vec<Box<dyn Filter>>, _>>()?;

        let registry = model.registry_mut();
        for (rule, filter) in rules.iter().zip(filters) {
            let observer =
                PrefixObserver::new(&rule.name, &rule.prefix, sink.clone()).with_format(format);
            registry.register_boxed(rule.name.clone(), Box::new(observer), filter);
        }
        Ok(())
    }

    /// Attach the built-in rules in text format.
    pub fn attach_defaults<S: QuerySource>(
        model: &mut SearchModel<S>,
        sink: &Sink,
    ) -> Result<(), ConfigError> {
        Self::attach(model, &Config::defaults().rules, sink, OutputFormat::Text)
    }
}

// src/formats/registry.rs

//! Ordered, mutable lists of format strings per [`FormatType`] and their
//! compiled catalogs.
//!
//! A [`FormatRegistry`] holds one immutable [`RegistrySnapshot`] at a time:
//! the three format lists together with the three catalogs compiled from
//! them. A parse clones the current snapshot `Arc` and releases the lock
//! before matching, so it never observes a partially rebuilt catalog.
//!
//! Mutations are serialized. Each one copies the current lists, applies its
//! change, recompiles every affected catalog, and only then swaps in the new
//! snapshot. A failed mutation leaves the registry unchanged.
//!
//! The process-wide registry is [`FORMAT_REGISTRY`], seeded with the built-in
//! [`definitions`]. Free functions [`parse`], [`add_formats`],
//! [`remove_formats`], [`remove_us_formats`], [`reset_formats`], and
//! [`formats`] operate on it.
//!
//! [`definitions`]: crate::formats::definitions

use crate::common::{
    FormatError,
    FormatStr,
    FormatString,
    FormatStrings,
    FormatType,
    ResultFormat,
    FORMAT_TYPES,
};
use crate::data::record::Record;
use crate::debug::printers::de_wrn;
use crate::formats::definitions::default_formats;
use crate::formats::formatset::{FormatSet, FormatSets};
use crate::formats::parser::{parse_sets, ParseOptions, Parsed};

use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use ::lazy_static::lazy_static;
use ::regex::Regex;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

lazy_static! {
    /// A format starting with a 1 or 2 digit month token followed by a
    /// non-month character, i.e. month-before-day layouts.
    static ref US_FORMAT_REGEX: Regex = Regex::new(r"\Am{1,2}[^m]").unwrap();

    /// The process-wide registry, seeded with the built-in formats.
    pub static ref FORMAT_REGISTRY: FormatRegistry =
        FormatRegistry::with_defaults().expect("built-in formats failed to compile");
}

/// Is `format` a month-before-day layout?
pub fn is_us_format(format: &FormatStr) -> bool {
    US_FORMAT_REGEX.is_match(format)
}

/// Format lists and the catalogs compiled from them.
#[derive(Debug)]
pub struct RegistrySnapshot {
    /// Incremented with every successful mutation.
    version: u64,
    formats: [FormatStrings; 3],
    sets: FormatSets,
}

impl RegistrySnapshot {
    fn compile(
        version: u64,
        formats: [FormatStrings; 3],
    ) -> ResultFormat<RegistrySnapshot> {
        let time = FormatSet::compile(FormatType::Time, &formats[FormatType::Time.index()])?;
        let date = FormatSet::compile(FormatType::Date, &formats[FormatType::Date.index()])?;
        let datetime = FormatSet::compile(FormatType::Datetime, &formats[FormatType::Datetime.index()])?;

        Ok(RegistrySnapshot {
            version,
            formats,
            sets: [Arc::new(time), Arc::new(date), Arc::new(datetime)],
        })
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Formats of `format_type` in precedence order.
    pub fn formats(
        &self,
        format_type: FormatType,
    ) -> &[FormatString] {
        self.formats[format_type.index()].as_slice()
    }

    pub fn format_set(
        &self,
        format_type: FormatType,
    ) -> &FormatSet {
        &self.sets[format_type.index()]
    }

    pub fn parse_matched(
        &self,
        value: &str,
        format_type: FormatType,
        options: &ParseOptions,
    ) -> Option<Parsed> {
        parse_sets(&self.sets, value, format_type, options)
    }

    pub fn parse(
        &self,
        value: &str,
        format_type: FormatType,
        options: &ParseOptions,
    ) -> Option<Record> {
        self.parse_matched(value, format_type, options)
            .map(|parsed| parsed.record)
    }
}

/// Ordered format lists per [`FormatType`] plus their compiled catalogs.
#[derive(Debug)]
pub struct FormatRegistry {
    snapshot: RwLock<Arc<RegistrySnapshot>>,
    /// Serializes mutations.
    mutation: Mutex<()>,
}

impl FormatRegistry {
    /// Create a registry from the given format lists; earlier formats take
    /// precedence.
    pub fn new<S: AsRef<str>>(
        time: &[S],
        date: &[S],
        datetime: &[S],
    ) -> ResultFormat<FormatRegistry> {
        let to_strings =
            |formats: &[S]| -> FormatStrings { formats.iter().map(|f| f.as_ref().to_string()).collect() };
        let formats: [FormatStrings; 3] = [to_strings(time), to_strings(date), to_strings(datetime)];
        for format_type in FORMAT_TYPES.iter() {
            let list: &FormatStrings = &formats[format_type.index()];
            for (at, format) in list.iter().enumerate() {
                if list[..at].contains(format) {
                    return Err(FormatError::AlreadyExists {
                        format_type: *format_type,
                        format: format.clone(),
                    });
                }
            }
        }
        let snapshot = RegistrySnapshot::compile(0, formats)?;

        Ok(FormatRegistry {
            snapshot: RwLock::new(Arc::new(snapshot)),
            mutation: Mutex::new(()),
        })
    }

    /// Create a registry with the built-in formats.
    pub fn with_defaults() -> ResultFormat<FormatRegistry> {
        FormatRegistry::new(
            &default_formats(FormatType::Time),
            &default_formats(FormatType::Date),
            &default_formats(FormatType::Datetime),
        )
    }

    /// The current snapshot. It stays valid, and unchanged, regardless of
    /// later mutations.
    pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
        let guard = match self.snapshot.read() {
            Ok(val) => val,
            Err(poisoned) => {
                de_wrn!("snapshot lock poisoned");
                poisoned.into_inner()
            }
        };

        Arc::clone(&guard)
    }

    pub fn version(&self) -> u64 {
        self.snapshot().version()
    }

    /// Formats of `format_type` in precedence order.
    pub fn formats(
        &self,
        format_type: FormatType,
    ) -> FormatStrings {
        self.snapshot()
            .formats(format_type)
            .to_vec()
    }

    /// Parse `value` as `format_type`, returning the record and which
    /// catalog and format matched.
    pub fn parse_matched(
        &self,
        value: &str,
        format_type: FormatType,
        options: &ParseOptions,
    ) -> Option<Parsed> {
        self.snapshot()
            .parse_matched(value, format_type, options)
    }

    /// Parse `value` as `format_type`. `None` if nothing matched or the
    /// matched values could not be resolved.
    pub fn parse(
        &self,
        value: &str,
        format_type: FormatType,
        options: &ParseOptions,
    ) -> Option<Record> {
        self.snapshot()
            .parse(value, format_type, options)
    }

    fn lock_mutation(&self) -> MutexGuard<'_, ()> {
        match self.mutation.lock() {
            Ok(val) => val,
            Err(poisoned) => {
                de_wrn!("mutation lock poisoned");
                poisoned.into_inner()
            }
        }
    }

    /// Apply `change` to a copy of the current format lists, recompile the
    /// catalogs of the types `change` returns, then swap in the new snapshot.
    fn mutate<F>(
        &self,
        change: F,
    ) -> ResultFormat<()>
    where
        F: FnOnce(&mut [FormatStrings; 3]) -> ResultFormat<Vec<FormatType>>,
    {
        let _guard = self.lock_mutation();
        let current: Arc<RegistrySnapshot> = self.snapshot();
        let mut formats: [FormatStrings; 3] = current.formats.clone();
        let changed: Vec<FormatType> = change(&mut formats)?;
        let mut sets: FormatSets = current.sets.clone();
        for format_type in changed.iter() {
            let set = FormatSet::compile(*format_type, &formats[format_type.index()])?;
            sets[format_type.index()] = Arc::new(set);
        }
        let next = RegistrySnapshot {
            version: current.version + 1,
            formats,
            sets,
        };
        defo!("swap in snapshot version {}", next.version);
        let mut guard = match self.snapshot.write() {
            Ok(val) => val,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Arc::new(next);

        Ok(())
    }

    /// Add `new_formats` to the `format_type` list, in the given order,
    /// before format `before` if passed, else at the end.
    ///
    /// Fails if any of `new_formats` is already in the list or `before` is
    /// not in the list.
    pub fn add_formats<S: AsRef<str>>(
        &self,
        format_type: FormatType,
        new_formats: &[S],
        before: Option<&FormatStr>,
    ) -> ResultFormat<()> {
        defn!("({}, {} formats, before {:?})", format_type, new_formats.len(), before);
        let result = self.mutate(|formats| {
            let list: &mut FormatStrings = &mut formats[format_type.index()];
            let mut at: usize = match before {
                Some(before_) => match list.iter().position(|f| f == before_) {
                    Some(val) => val,
                    None => {
                        return Err(FormatError::AnchorNotFound {
                            format_type,
                            format: before_.to_string(),
                        });
                    }
                },
                None => list.len(),
            };
            for format in new_formats.iter() {
                let format: &str = format.as_ref();
                if list.iter().any(|f| f == format) {
                    return Err(FormatError::AlreadyExists {
                        format_type,
                        format: format.to_string(),
                    });
                }
                list.insert(at, format.to_string());
                at += 1;
            }

            Ok(vec![format_type])
        });
        defx!("return {:?}", result);

        result
    }

    /// Remove `old_formats` from the `format_type` list.
    ///
    /// Fails if any of `old_formats` is not in the list.
    pub fn remove_formats<S: AsRef<str>>(
        &self,
        format_type: FormatType,
        old_formats: &[S],
    ) -> ResultFormat<()> {
        defn!("({}, {} formats)", format_type, old_formats.len());
        let result = self.mutate(|formats| {
            let list: &mut FormatStrings = &mut formats[format_type.index()];
            for format in old_formats.iter() {
                let format: &str = format.as_ref();
                match list.iter().position(|f| f == format) {
                    Some(at) => {
                        list.remove(at);
                    }
                    None => {
                        return Err(FormatError::NotFound {
                            format_type,
                            format: format.to_string(),
                        });
                    }
                }
            }

            Ok(vec![format_type])
        });
        defx!("return {:?}", result);

        result
    }

    /// Remove every month-before-day format from the `date` and `datetime`
    /// lists, so day-before-month formats take precedence.
    pub fn remove_us_formats(&self) -> ResultFormat<()> {
        defn!();
        let result = self.mutate(|formats| {
            for format_type in [FormatType::Date, FormatType::Datetime].iter() {
                let list: &mut FormatStrings = &mut formats[format_type.index()];
                let _len: usize = list.len();
                list.retain(|format| !is_us_format(format));
                defo!("{} removed {} formats", format_type, _len - list.len());
            }

            Ok(vec![FormatType::Date, FormatType::Datetime])
        });
        defx!("return {:?}", result);

        result
    }

    /// Restore the built-in formats of every type.
    pub fn reset(&self) -> ResultFormat<()> {
        defn!();
        let result = self.mutate(|formats| {
            for format_type in FORMAT_TYPES.iter() {
                formats[format_type.index()] = default_formats(*format_type);
            }

            Ok(FORMAT_TYPES.to_vec())
        });
        defx!("return {:?}", result);

        result
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// process-wide registry
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Parse `value` as `format_type` using [`FORMAT_REGISTRY`].
pub fn parse(
    value: &str,
    format_type: FormatType,
    options: &ParseOptions,
) -> Option<Record> {
    FORMAT_REGISTRY.parse(value, format_type, options)
}

/// [`FormatRegistry::add_formats`] on [`FORMAT_REGISTRY`].
pub fn add_formats<S: AsRef<str>>(
    format_type: FormatType,
    new_formats: &[S],
    before: Option<&FormatStr>,
) -> ResultFormat<()> {
    FORMAT_REGISTRY.add_formats(format_type, new_formats, before)
}

/// [`FormatRegistry::remove_formats`] on [`FORMAT_REGISTRY`].
pub fn remove_formats<S: AsRef<str>>(
    format_type: FormatType,
    old_formats: &[S],
) -> ResultFormat<()> {
    FORMAT_REGISTRY.remove_formats(format_type, old_formats)
}

/// [`FormatRegistry::remove_us_formats`] on [`FORMAT_REGISTRY`].
pub fn remove_us_formats() -> ResultFormat<()> {
    FORMAT_REGISTRY.remove_us_formats()
}

/// [`FormatRegistry::reset`] on [`FORMAT_REGISTRY`].
pub fn reset_formats() -> ResultFormat<()> {
    FORMAT_REGISTRY.reset()
}

/// Formats of `format_type` in [`FORMAT_REGISTRY`].
pub fn formats(format_type: FormatType) -> FormatStrings {
    FORMAT_REGISTRY.formats(format_type)
}

use crate::{Error, Institution, Result};
use ahash::AHashMap;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

/// Minimum number of ids a comparison needs
pub const MIN_COMPARE_IDS: usize = 2;

/// The immutable set of institutions the engine ranks.
///
/// Loaded once at startup. A single bad record fails the whole load.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    institutions: Vec<Institution>,
    index: AHashMap<u64, usize>,
}

impl Dataset {
    /// Build a dataset from already-parsed institutions
    pub fn new(institutions: Vec<Institution>) -> Result<Self> {
        let mut index = AHashMap::with_capacity(institutions.len());
        for (position, institution) in institutions.iter().enumerate() {
            institution
                .check()
                .map_err(|reason| Error::MalformedRecord { index: position, reason })?;
            if index.insert(institution.id, position).is_some() {
                return Err(Error::DuplicateId(institution.id));
            }
        }
        Ok(Self { institutions, index })
    }

    /// Parse a JSON array of institution records
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<Value> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let records: Vec<Value> = serde_json::from_reader(reader)?;
        Self::from_records(records)
    }

    /// Load a dataset file from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let dataset = Self::from_reader(BufReader::new(file))?;
        info!("Loaded {} institutions from {:?}", dataset.len(), path);
        Ok(dataset)
    }

    fn from_records(records: Vec<Value>) -> Result<Self> {
        let institutions = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                serde_json::from_value::<Institution>(record).map_err(|e| Error::MalformedRecord {
                    index,
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(institutions)
    }

    #[inline]
    pub fn institutions(&self) -> &[Institution] {
        &self.institutions
    }

    #[inline]
    pub fn get(&self, id: u64) -> Option<&Institution> {
        self.index.get(&id).map(|&position| &self.institutions[position])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.institutions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.institutions.is_empty()
    }

    /// Side-by-side view of the requested institutions.
    ///
    /// Matches are returned in dataset order. Unknown ids are ignored as long
    /// as at least one id resolves.
    pub fn compare(&self, ids: &[u64]) -> Result<Comparison> {
        if ids.len() < MIN_COMPARE_IDS {
            return Err(Error::InsufficientIds {
                required: MIN_COMPARE_IDS,
                actual: ids.len(),
            });
        }

        let wanted: HashSet<u64> = ids.iter().copied().collect();
        let selected: Vec<Institution> = self
            .institutions
            .iter()
            .filter(|i| wanted.contains(&i.id))
            .cloned()
            .collect();

        if selected.is_empty() {
            return Err(Error::NoMatchingInstitutions);
        }
        debug!("Comparing {} of {} requested institutions", selected.len(), ids.len());

        Ok(Comparison::new(selected))
    }
}

/// Result of [`Dataset::compare`]
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    #[serde(rename = "colleges")]
    pub institutions: Vec<Institution>,
    pub common_features: CommonFeatures,
    pub differences: Differences,
}

/// Values shared by every compared institution
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CommonFeatures {
    /// Ordered as in the first compared institution
    pub programs: Vec<String>,
    pub streams: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Differences {
    /// Programs each institution offers that not all the others do
    pub unique_programs: BTreeMap<u64, Vec<String>>,
}

impl Comparison {
    fn new(institutions: Vec<Institution>) -> Self {
        let programs = intersect(&institutions, |i| &i.programs);
        let streams = intersect(&institutions, |i| &i.streams);

        let unique_programs = institutions
            .iter()
            .map(|i| {
                let unique = i
                    .programs
                    .iter()
                    .filter(|p| !programs.contains(p))
                    .cloned()
                    .collect();
                (i.id, unique)
            })
            .collect();

        Self {
            institutions,
            common_features: CommonFeatures { programs, streams },
            differences: Differences { unique_programs },
        }
    }
}

fn intersect<F>(institutions: &[Institution], field: F) -> Vec<String>
where
    F: Fn(&Institution) -> &Vec<String>,
{
    let Some((first, rest)) = institutions.split_first() else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    field(first)
        .iter()
        .filter(|value| rest.iter().all(|other| field(other).contains(*value)))
        .filter(|value| seen.insert(value.as_str()))
        .cloned()
        .collect()
}

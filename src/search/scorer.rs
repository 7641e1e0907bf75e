// file: src/search/scorer.rs
// description: relevance weights used to rank search hits
// reference: scoring constants of the documentation theme's search widget

use crate::models::ObjectPriority;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scorer {
    /// Query equals the object's full name or last dotted component.
    pub obj_name_match: i64,
    /// Query is contained in the last dotted component.
    pub obj_partial_match: i64,
    pub obj_prio_important: i64,
    pub obj_prio_normal: i64,
    pub obj_prio_unimportant: i64,
    /// Bonus for any other priority value.
    pub obj_prio_other: i64,
    pub title: i64,
    pub partial_title: i64,
    pub term: i64,
    pub partial_term: i64,
    /// Index entries score `index_entry * query length / entry length`.
    pub index_entry: i64,
}

impl Default for Scorer {
    fn default() -> Self {
        Self {
            obj_name_match: 11,
            obj_partial_match: 6,
            obj_prio_important: 15,
            obj_prio_normal: 5,
            obj_prio_unimportant: -5,
            obj_prio_other: 0,
            title: 15,
            partial_title: 7,
            term: 5,
            partial_term: 2,
            index_entry: 100,
        }
    }
}

impl Scorer {
    pub fn priority_bonus(&self, priority: ObjectPriority) -> i64 {
        match priority {
            ObjectPriority::Important => self.obj_prio_important,
            ObjectPriority::Default => self.obj_prio_normal,
            ObjectPriority::Unimportant => self.obj_prio_unimportant,
            ObjectPriority::Hidden(_) => self.obj_prio_other,
        }
    }

    /// Weight scaled by how much of `target` the query covers.
    pub fn coverage(weight: i64, query_len: usize, target_len: usize) -> i64 {
        if target_len == 0 {
            return 0;
        }
        ((weight as f64) * (query_len as f64) / (target_len as f64)).round() as i64
    }
}

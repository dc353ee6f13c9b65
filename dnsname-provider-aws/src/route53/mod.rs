//! Route 53
//!
//! Route 53 returns hosted zone and record names lower-cased, without the
//! trailing dot, and with every byte outside `[A-Za-z0-9_-]` (apart from the
//! label separator) written as a `\DDD` octal escape. Configuration values
//! are brought into the same form before they are compared with API state.

pub mod clean;
pub mod differ;
pub mod normalize;
pub mod record_id;

pub use clean::{
    clean_change_id, clean_delegation_set_id, clean_health_check_id, clean_record_name,
    clean_zone_id, expand_record_name,
};
pub use differ::{DiffOptions, NameKind, find_changed_name_attributes, names_equivalent};
pub use normalize::{
    normalize_alias_domain_name, normalize_alias_name, normalize_domain_name,
    normalize_elb_alias_name, normalize_name_into_api_representation, normalize_zone_name,
};
pub use record_id::{RecordId, RecordType};

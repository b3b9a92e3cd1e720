use super::enums::Position;

/// Conjunctive predicate over hospital workers. Unset fields match anything.
///
/// Used both as a filter and as an exclusion: as an exclusion it removes the
/// workers that match every set field, so an empty `WorkerFilter` excludes nothing.
#[derive(Debug, Default, Clone)]
pub struct WorkerFilter {
    pub position: Option<Position>,
    pub department_id: Option<i64>,
    pub hospital_id: Option<i64>,
    pub person_id: Option<i64>,
    pub min_age: Option<u16>,
}

impl WorkerFilter {
    pub fn position(position: Position) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    /// True when no field is set; such a filter matches every worker.
    pub fn is_empty(&self) -> bool {
        self.position.is_none()
            && self.department_id.is_none()
            && self.hospital_id.is_none()
            && self.person_id.is_none()
            && self.min_age.is_none()
    }
}

#[derive(Debug, Default, Clone)]
pub struct PatientFilter {
    pub department_id: Option<i64>,
    pub hospital_id: Option<i64>,
    pub person_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_is_empty() {
        assert!(WorkerFilter::default().is_empty());
        assert!(!WorkerFilter::position(Position::Nurse).is_empty());
        let by_age = WorkerFilter {
            min_age: Some(60),
            ..WorkerFilter::default()
        };
        assert!(!by_age.is_empty());
    }
}

use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum TopologyError {
    #[error("A particle group must have at least one member")]
    EmptyGroup,
    #[error("Bond ({0}, {1}) references a particle that is not a group member")]
    BondOutsideGroup(usize, usize),
    #[error("Bond ({0}, {0}) connects a particle to itself")]
    SelfBond(usize),
    #[error("Particle id does not belong to this system")]
    UnknownParticle,
}

/// A bond between two particles, stored as dense sequence indices.
///
/// The pair is normalized so that `i < j`, which makes bonds directly
/// comparable with the order-independent keys used by the pair-list generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub i: usize,
    pub j: usize,
}

impl Bond {
    /// Creates a normalized bond with `i < j`.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::SelfBond`] if both endpoints are the same.
    pub fn new(a: usize, b: usize) -> Result<Self, TopologyError> {
        if a == b {
            return Err(TopologyError::SelfBond(a));
        }
        Ok(Self {
            i: a.min(b),
            j: a.max(b),
        })
    }

    /// The order-independent pair key for de-duplication against pair lists.
    #[inline]
    pub fn key(&self) -> (usize, usize) {
        (self.i, self.j)
    }
}

/// A set of member particles plus the bonds between them.
///
/// Groups model bonded molecules: internal bonds are evaluated by the bonded
/// potential walk and are excluded from non-bonded pair generation. The
/// constructor enforces the structural invariants, so a constructed group is
/// always internally consistent.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleGroup {
    members: Vec<usize>,
    bonds: Vec<Bond>,
}

impl ParticleGroup {
    /// Creates a new group from member indices and bonds between them.
    ///
    /// # Arguments
    ///
    /// * `members` - Dense sequence indices of the member particles.
    /// * `bonds` - Index pairs to bond; every endpoint must be a member.
    ///
    /// # Errors
    ///
    /// Returns a [`TopologyError`] if the member list is empty, a bond is a
    /// self-bond, or a bond endpoint is not a member.
    pub fn new(members: Vec<usize>, bonds: Vec<(usize, usize)>) -> Result<Self, TopologyError> {
        if members.is_empty() {
            return Err(TopologyError::EmptyGroup);
        }
        let member_set: HashSet<usize> = members.iter().copied().collect();
        let mut normalized = Vec::with_capacity(bonds.len());
        for (a, b) in bonds {
            let bond = Bond::new(a, b)?;
            if !member_set.contains(&bond.i) || !member_set.contains(&bond.j) {
                return Err(TopologyError::BondOutsideGroup(bond.i, bond.j));
            }
            normalized.push(bond);
        }
        Ok(Self {
            members,
            bonds: normalized,
        })
    }

    /// The dense sequence indices of the member particles.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// The bonds between member particles.
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }
}

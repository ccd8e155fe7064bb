use soroban_sdk::{contracttype, Address, Env, Map};

use crate::Error;

/// Upper bound on distinct manager identities.
pub const MAX_MANAGERS: u32 = 16;

/// Admin identity plus the set of managers allowed to settle orders.
#[contracttype]
#[derive(Clone, Debug)]
pub struct AccessControl {
    pub admin: Address,
    pub managers: Map<Address, bool>,
}

impl AccessControl {
    pub fn new(env: &Env, admin: Address) -> Self {
        Self {
            admin,
            managers: Map::new(env),
        }
    }

    pub fn is_admin(&self, caller: &Address) -> bool {
        *caller == self.admin
    }

    pub fn is_manager(&self, caller: &Address) -> bool {
        self.managers.get(caller.clone()).unwrap_or(false)
    }

    pub fn require_admin(&self, caller: &Address) -> Result<(), Error> {
        if !self.is_admin(caller) {
            return Err(Error::PermissionDenied);
        }
        Ok(())
    }

    pub fn require_manager(&self, caller: &Address) -> Result<(), Error> {
        if !self.is_manager(caller) {
            return Err(Error::PermissionDenied);
        }
        Ok(())
    }

    /// Hand the admin role to `new_admin`. There is no acceptance step.
    pub fn set_admin(&mut self, caller: &Address, new_admin: Address) -> Result<(), Error> {
        self.require_admin(caller)?;
        self.admin = new_admin;
        Ok(())
    }

    pub fn add_manager(&mut self, caller: &Address, who: Address) -> Result<(), Error> {
        self.require_admin(caller)?;
        if self.managers.contains_key(who.clone()) {
            return Ok(());
        }
        if self.managers.len() >= MAX_MANAGERS {
            return Err(Error::StoreFull);
        }
        self.managers.set(who, true);
        Ok(())
    }

    /// Removing an address that was never a manager succeeds without effect.
    pub fn remove_manager(&mut self, caller: &Address, who: Address) -> Result<(), Error> {
        self.require_admin(caller)?;
        self.managers.remove(who);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::testutils::Address as _;

    #[test]
    fn test_admin_and_manager_checks() {
        let env = Env::default();
        let admin = Address::generate(&env);
        let other = Address::generate(&env);
        let mut access = AccessControl::new(&env, admin.clone());

        assert!(access.is_admin(&admin));
        assert!(!access.is_admin(&other));
        assert!(!access.is_manager(&other));
        assert_eq!(access.require_manager(&other), Err(Error::PermissionDenied));

        access.add_manager(&admin, other.clone()).unwrap();
        assert!(access.is_manager(&other));
        // Admin is not implicitly a manager
        assert!(!access.is_manager(&admin));
    }

    #[test]
    fn test_only_admin_mutates_roles() {
        let env = Env::default();
        let admin = Address::generate(&env);
        let intruder = Address::generate(&env);
        let mut access = AccessControl::new(&env, admin.clone());

        assert_eq!(
            access.add_manager(&intruder, intruder.clone()),
            Err(Error::PermissionDenied)
        );
        assert_eq!(
            access.remove_manager(&intruder, admin.clone()),
            Err(Error::PermissionDenied)
        );
        assert_eq!(
            access.set_admin(&intruder, intruder.clone()),
            Err(Error::PermissionDenied)
        );
        assert_eq!(access.admin, admin);
        assert_eq!(access.managers.len(), 0);
    }

    #[test]
    fn test_manager_set_is_bounded() {
        let env = Env::default();
        let admin = Address::generate(&env);
        let mut access = AccessControl::new(&env, admin.clone());

        let first = Address::generate(&env);
        access.add_manager(&admin, first.clone()).unwrap();
        for _ in 1..MAX_MANAGERS {
            access.add_manager(&admin, Address::generate(&env)).unwrap();
        }
        assert_eq!(access.managers.len(), MAX_MANAGERS);

        assert_eq!(
            access.add_manager(&admin, Address::generate(&env)),
            Err(Error::StoreFull)
        );
        // Re-adding an existing member is still fine when full
        assert_eq!(access.add_manager(&admin, first.clone()), Ok(()));

        access.remove_manager(&admin, first).unwrap();
        assert_eq!(access.add_manager(&admin, Address::generate(&env)), Ok(()));
    }
}

//! User operations

use tracing::{info, instrument};

use super::{Ack, MockApi, UserRepository};
use crate::error::Result;
use crate::models::{NewUser, User, UserPatch};

impl UserRepository for MockApi<'_> {
    fn get_all_users(&self) -> Result<Vec<User>> {
        Ok(self.store.users.all().to_vec())
    }

    #[instrument(skip(self, user), fields(username = %user.username))]
    fn create_user(&mut self, user: NewUser) -> Result<User> {
        self.store
            .users
            .insert_with(|id, now| Ok(user.into_user(id, now)))
    }

    #[instrument(skip(self, patch))]
    fn update_user(&mut self, id: u64, patch: UserPatch) -> Result<User> {
        self.store.users.update_with(id, |user| {
            patch.apply(user);
            Ok(())
        })
    }

    #[instrument(skip(self))]
    fn delete_user(&mut self, id: u64) -> Result<Ack> {
        self.store.users.remove(id)?;
        Ok(Ack::ok())
    }

    #[instrument(skip(self))]
    fn reset_user_password(&mut self, id: u64) -> Result<Ack> {
        info!(user_id = id, "Password reset requested");
        Ok(Ack::ok())
    }
}

//! Profile command and query handlers for musicians and venues.

mod create_musician_profile;
mod create_venue_profile;
mod get_musician_profile;
mod get_venue_profile;
mod requests;
mod update_musician_profile;
mod update_venue_profile;

pub use create_musician_profile::{CreateMusicianProfileCommand, CreateMusicianProfileHandler};
pub use create_venue_profile::{CreateVenueProfileCommand, CreateVenueProfileHandler};
pub use get_musician_profile::{GetMusicianProfileHandler, GetMusicianProfileQuery};
pub use get_venue_profile::{GetVenueProfileHandler, GetVenueProfileQuery};
pub use requests::{
    CreateMusicianProfileRequest, CreateVenueProfileRequest, UpdateMusicianProfileRequest,
    UpdateVenueProfileRequest,
};
pub use update_musician_profile::{UpdateMusicianProfileCommand, UpdateMusicianProfileHandler};
pub use update_venue_profile::{UpdateVenueProfileCommand, UpdateVenueProfileHandler};

use crate::domain::foundation::{CallerContext, UserType};
use crate::domain::profile::ProfileError;

/// Only a caller of the matching type may own a profile of that kind.
fn ensure_user_type(caller: &CallerContext, expected: UserType) -> Result<(), ProfileError> {
    if caller.user_type == expected {
        Ok(())
    } else {
        Err(ProfileError::Forbidden)
    }
}

mod session_keys;

use rls_auth::AccessProjection;

use uuid::Uuid;

pub(crate) const TENANT: Uuid = Uuid::from_u128(0x0000_0000_0000_0000_0000_0000_0000_00a1);
pub(crate) const USER: Uuid = Uuid::from_u128(0x0c67_622b_fcc5_4b58_9998_421b_73e4_8df9);

pub(crate) fn projection() -> AccessProjection {
    AccessProjection::new(TENANT, USER)
}

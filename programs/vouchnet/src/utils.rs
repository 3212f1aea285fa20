use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Allocate, Assign, CreateAccount, Transfer};

// Account plumbing for the handlers that create or read accounts whose absence
// is a domain outcome (unknown code, unregistered target, missing post) rather
// than a malformed transaction.

/// Whether `info` already holds one of our accounts
pub fn is_allocated(info: &AccountInfo) -> bool {
    info.owner == &crate::ID && !info.data_is_empty()
}

/// Deserialize `info` if it holds a `T`; `None` if the address is still empty
pub fn load_optional<T>(info: &AccountInfo) -> Result<Option<T>>
where
    T: AccountDeserialize + Owner,
{
    if info.owner != &T::owner() || info.data_is_empty() {
        return Ok(None);
    }
    let data = info.try_borrow_data()?;
    let mut slice: &[u8] = &data;
    T::try_deserialize(&mut slice).map(Some)
}

/// Serialize `value` (with discriminator) into an account we own
pub fn write_account<T: AccountSerialize>(info: &AccountInfo, value: &T) -> Result<()> {
    let mut data = info.try_borrow_mut_data()?;
    let mut dst: &mut [u8] = &mut data[..];
    value.try_serialize(&mut dst)
}

/// Create a program-owned PDA at `new_account`. The caller has already
/// checked that no account of ours lives there.
///
/// A PDA can hold lamports before it is created (anyone may transfer to it),
/// in which case `create_account` would fail; that path tops up rent and
/// allocates/assigns instead.
pub fn create_program_account<'info>(
    payer: &AccountInfo<'info>,
    new_account: &AccountInfo<'info>,
    system: &AccountInfo<'info>,
    seeds: &[&[u8]],
    space: usize,
) -> Result<()> {
    let signer: &[&[&[u8]]] = &[seeds];
    let rent = Rent::get()?.minimum_balance(space);
    let current = new_account.lamports();

    if current == 0 {
        return system_program::create_account(
            CpiContext::new_with_signer(
                system.clone(),
                CreateAccount {
                    from: payer.clone(),
                    to: new_account.clone(),
                },
                signer,
            ),
            rent,
            space as u64,
            &crate::ID,
        );
    }

    let top_up = rent.saturating_sub(current);
    if top_up > 0 {
        system_program::transfer(
            CpiContext::new(
                system.clone(),
                Transfer {
                    from: payer.clone(),
                    to: new_account.clone(),
                },
            ),
            top_up,
        )?;
    }
    system_program::allocate(
        CpiContext::new_with_signer(
            system.clone(),
            Allocate {
                account_to_allocate: new_account.clone(),
            },
            signer,
        ),
        space as u64,
    )?;
    system_program::assign(
        CpiContext::new_with_signer(
            system.clone(),
            Assign {
                account_to_assign: new_account.clone(),
            },
            signer,
        ),
        &crate::ID,
    )
}

#[cfg(test)]
pub(crate) mod test_accounts {
    use anchor_lang::prelude::*;

    /// Backing storage for an `AccountInfo` in unit tests
    pub struct FakeAccount {
        pub key: Pubkey,
        pub is_signer: bool,
        pub owner: Pubkey,
        pub lamports: u64,
        pub data: Vec<u8>,
    }

    impl FakeAccount {
        /// An address nothing has been created at
        pub fn empty(key: Pubkey) -> Self {
            FakeAccount {
                key,
                is_signer: false,
                owner: anchor_lang::system_program::ID,
                lamports: 0,
                data: Vec::new(),
            }
        }

        /// A wallet signing the transaction
        pub fn signer(key: Pubkey) -> Self {
            FakeAccount {
                is_signer: true,
                lamports: 1_000_000_000,
                ..Self::empty(key)
            }
        }

        /// One of our accounts holding `value`
        pub fn holding<T: AccountSerialize>(key: Pubkey, value: &T) -> Self {
            let mut data = Vec::new();
            value.try_serialize(&mut data).unwrap();
            FakeAccount {
                key,
                is_signer: false,
                owner: crate::ID,
                lamports: 1_000_000,
                data,
            }
        }

        pub fn info(&mut self) -> AccountInfo<'_> {
            AccountInfo::new(
                &self.key,
                self.is_signer,
                true,
                &mut self.lamports,
                &mut self.data,
                &self.owner,
                false,
                0,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_accounts::FakeAccount;
    use super::*;
    use crate::state::tests_support::member;
    use crate::state::Member;

    #[test]
    fn empty_address_loads_as_none() {
        let mut acct = FakeAccount::empty(Pubkey::new_unique());
        let info = acct.info();
        assert!(!is_allocated(&info));
        assert!(load_optional::<Member>(&info).unwrap().is_none());
    }

    #[test]
    fn foreign_owned_data_loads_as_none() {
        let user = Pubkey::new_unique();
        let mut acct = FakeAccount::holding(Pubkey::new_unique(), &member(user));
        acct.owner = Pubkey::new_unique();
        let info = acct.info();
        assert!(!is_allocated(&info));
        assert!(load_optional::<Member>(&info).unwrap().is_none());
    }

    #[test]
    fn written_account_reads_back() {
        let user = Pubkey::new_unique();
        let mut acct = FakeAccount::holding(Pubkey::new_unique(), &member(user));
        let info = acct.info();
        assert!(is_allocated(&info));

        let mut m = load_optional::<Member>(&info).unwrap().unwrap();
        m.advance_nonce();
        write_account(&info, &m).unwrap();

        let reread = load_optional::<Member>(&info).unwrap().unwrap();
        assert_eq!(reread.user, user);
        assert_eq!(reread.nonce, 1);
    }
}

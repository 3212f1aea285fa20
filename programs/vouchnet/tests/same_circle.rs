mod common;

use std::collections::HashMap;

use anchor_lang::prelude::Pubkey;
use common::{codes, error_code, Network};
use proptest::prelude::*;
use vouchnet::errors::SocialError;

/// Grow a random invitation forest. Each pick selects the node (root issuer or
/// already activated user) whose invitation the next user consumes.
fn grow_forest(net: &mut Network, roots: usize, picks: &[usize]) -> HashMap<Pubkey, Pubkey> {
    let roots: Vec<Pubkey> = (0..roots).map(|_| Pubkey::new_unique()).collect();
    for root in &roots {
        net.grant_issuer(*root);
    }
    let operator = roots[0];

    let mut nodes = roots.clone();
    let mut parent_of = HashMap::new();
    let mut root_codes = 0usize;

    for (n, pick) in picks.iter().enumerate() {
        let parent = nodes[pick % nodes.len()];
        let code = if roots.contains(&parent) {
            root_codes += 1;
            let code = format!("R{root_codes}");
            net.mint_batch(parent, &[code.clone()]).unwrap();
            code
        } else {
            match net.held_by(parent).into_iter().find(|i| !i.used) {
                Some(inv) => inv.code.clone(),
                // Parent already handed out all 12
                None => continue,
            }
        };

        let user = Pubkey::new_unique();
        net.activate(operator, &code, user, &codes(&format!("U{n}-"), 12))
            .unwrap();
        parent_of.insert(user, parent);
        nodes.push(user);
    }
    parent_of
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn superlikes_only_land_inside_a_circle(
        roots in 1usize..4,
        picks in prop::collection::vec(0usize..64, 2..20),
        pairs in prop::collection::vec((0usize..64, 0usize..64), 1..30),
    ) {
        let mut net = Network::new();
        let parent_of = grow_forest(&mut net, roots, &picks);
        let users: Vec<Pubkey> = net.activated.clone();
        prop_assume!(!users.is_empty());

        // One post per user, each about its own seller
        let mut post_of = HashMap::new();
        for user in &users {
            let seller = Pubkey::new_unique();
            net.register(seller);
            post_of.insert(*user, net.create_post(*user, seller).unwrap());
        }

        for (a, l) in pairs {
            let author = users[a % users.len()];
            let liker = users[l % users.len()];
            let post = post_of[&author];
            let before = net.posts[post as usize].superlike_count;

            let result = net.superlike(post, liker);
            prop_assert_eq!(
                net.activations[&author].ancestor == net.activations[&liker].ancestor,
                parent_of[&author] == parent_of[&liker]
            );

            if author == liker {
                prop_assert_eq!(
                    result.map_err(error_code),
                    Err(error_code(SocialError::CannotLikeOwnPost.into()))
                );
            } else if parent_of[&author] != parent_of[&liker] {
                prop_assert_eq!(
                    result.map_err(error_code),
                    Err(error_code(SocialError::NotInSameCircle.into()))
                );
                prop_assert_eq!(net.posts[post as usize].superlike_count, before);
            } else {
                let after = net.posts[post as usize].superlike_count;
                match result {
                    Ok(()) => prop_assert_eq!(after, before + 1),
                    Err(e) => {
                        let code = error_code(e);
                        let allowed = [
                            SocialError::AlreadySuperliked,
                            SocialError::MonthlySuperlikeLimitExhausted,
                        ];
                        prop_assert!(allowed.iter().any(|e| error_code((*e).into()) == code));
                        prop_assert_eq!(after, before);
                    }
                }
            }
        }
    }
}

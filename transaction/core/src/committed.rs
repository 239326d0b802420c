// Copyright (c) 2018-2022 The Botho Foundation

//! Balance checking for anything made of committed inputs and outputs.

use mw_crypto_secp256k1::{Commitment, RangeProof, Secp256k1};
use tracing::debug;

use crate::Error;

/// Something made of input and output commitments plus an explicit,
/// unblinded overage (a fee, or a block reward when negative).
pub trait Committed {
    /// The commitments being spent.
    fn inputs_committed(&self) -> Vec<Commitment>;

    /// The commitments being created.
    fn outputs_committed(&self) -> Vec<Commitment>;

    /// Every output commitment with its range proof.
    fn outputs_range_proofs(&self) -> Vec<(Commitment, &RangeProof)>;

    /// Value leaving (positive) or entering (negative) in the clear.
    fn overage(&self) -> i128;

    /// `Σoutputs − Σinputs`, with the overage committed on the side that
    /// balances it, after checking every output's range proof.
    ///
    /// For a balanced entity the result is a commitment to zero, `excess·G`
    /// for the net blinding factor. A sum that cancels to the point at
    /// infinity is an error.
    fn sum_commitments(&self, secp: &Secp256k1) -> Result<Commitment, Error> {
        for (commit, proof) in self.outputs_range_proofs() {
            if secp.verify_range_proof(&commit, proof).is_err() {
                debug!("Invalid range proof for output {:?}", commit);
                return Err(Error::InvalidRangeProof);
            }
        }

        let mut inputs = self.inputs_committed();
        let mut outputs = self.outputs_committed();

        let overage = self.overage();
        if overage != 0 {
            let magnitude =
                u64::try_from(overage.unsigned_abs()).map_err(|_| Error::OverageTooLarge(overage))?;
            let over_commit = secp.commit_value(magnitude)?;
            if overage > 0 {
                outputs.push(over_commit);
            } else {
                inputs.push(over_commit);
            }
        }

        Ok(secp.commit_sum(&outputs, &inputs)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mw_crypto_secp256k1::{secret_key_from_slice, ContextFlag, ProofMessage, SecretKey};
    use proptest::prelude::*;

    /// Bare commitments and an overage, with proofs made from known blinds.
    struct Entity {
        inputs: Vec<Commitment>,
        outputs: Vec<(Commitment, RangeProof)>,
        overage: i128,
    }

    impl Committed for Entity {
        fn inputs_committed(&self) -> Vec<Commitment> {
            self.inputs.clone()
        }

        fn outputs_committed(&self) -> Vec<Commitment> {
            self.outputs.iter().map(|(commit, _)| *commit).collect()
        }

        fn outputs_range_proofs(&self) -> Vec<(Commitment, &RangeProof)> {
            self.outputs
                .iter()
                .map(|(commit, proof)| (*commit, proof))
                .collect()
        }

        fn overage(&self) -> i128 {
            self.overage
        }
    }

    fn secp() -> Secp256k1 {
        Secp256k1::with_caps(ContextFlag::Commit)
    }

    /// The secret key with the value `n`.
    fn blind(n: u64) -> SecretKey {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&n.to_be_bytes());
        secret_key_from_slice(&bytes).unwrap()
    }

    fn proven(secp: &Secp256k1, value: u64, r: u64) -> (Commitment, RangeProof) {
        let blind = blind(r);
        let commit = secp.commit(value, &blind).unwrap();
        let proof = secp
            .range_proof(value, &blind, &commit, &ProofMessage::empty())
            .unwrap();
        (commit, proof)
    }

    #[test]
    fn positive_overage_balances_a_fee() {
        let secp = secp();
        let entity = Entity {
            inputs: vec![secp.commit(10, &blind(5)).unwrap()],
            outputs: vec![proven(&secp, 8, 7)],
            overage: 2,
        };
        assert_eq!(
            entity.sum_commitments(&secp).unwrap(),
            secp.commit(0, &blind(2)).unwrap()
        );
    }

    #[test]
    fn negative_overage_balances_a_reward() {
        let secp = secp();
        let entity = Entity {
            inputs: vec![],
            outputs: vec![proven(&secp, 50, 11)],
            overage: -50,
        };
        assert_eq!(
            entity.sum_commitments(&secp).unwrap(),
            secp.commit(0, &blind(11)).unwrap()
        );
    }

    #[test]
    fn zero_overage_adds_nothing() {
        let secp = secp();
        let entity = Entity {
            inputs: vec![secp.commit(4, &blind(3)).unwrap()],
            outputs: vec![proven(&secp, 4, 9)],
            overage: 0,
        };
        assert_eq!(
            entity.sum_commitments(&secp).unwrap(),
            secp.commit(0, &blind(6)).unwrap()
        );
    }

    #[test]
    fn any_bad_range_proof_rejects_the_whole_entity() {
        let secp = secp();
        let (good_commit, good_proof) = proven(&secp, 3, 1);
        let (other_commit, _) = proven(&secp, 4, 2);
        let entity = Entity {
            inputs: vec![],
            outputs: vec![(good_commit, good_proof), (other_commit, good_proof)],
            overage: -7,
        };
        assert_eq!(entity.sum_commitments(&secp), Err(Error::InvalidRangeProof));
    }

    #[test]
    fn huge_overage_is_rejected() {
        let secp = secp();
        let entity = Entity {
            inputs: vec![],
            outputs: vec![],
            overage: i128::from(u64::MAX) + 1,
        };
        assert_eq!(
            entity.sum_commitments(&secp),
            Err(Error::OverageTooLarge(i128::from(u64::MAX) + 1))
        );

        let entity = Entity {
            overage: -i128::from(u64::MAX),
            ..entity
        };
        assert_eq!(
            entity.sum_commitments(&secp).unwrap(),
            secp.commit_sum(&[], &[secp.commit_value(u64::MAX).unwrap()])
                .unwrap()
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(4))]

        #[test]
        fn excess_is_the_blinding_difference(
            a in 0u64..u64::MAX / 4,
            b in 0u64..u64::MAX / 4,
            fee in 0u64..1000,
            r_in in 1u64..u64::MAX,
            r_out in 1u64..u64::MAX,
        ) {
            prop_assume!(r_out + 1 != r_in);
            let secp = secp();
            let entity = Entity {
                inputs: vec![secp.commit(a + b + fee, &blind(r_in)).unwrap()],
                outputs: vec![proven(&secp, a, r_out), proven(&secp, b, 1)],
                overage: i128::from(fee),
            };
            let excess = secp
                .blind_sum(&[blind(r_out), blind(1)], &[blind(r_in)])
                .unwrap();
            prop_assert_eq!(
                entity.sum_commitments(&secp).unwrap(),
                secp.commit(0, &secret_key_from_slice(&excess).unwrap()).unwrap()
            );
        }
    }
}

use quartet::{
    BlockIndex, BlockState, CandidateStates, CrossTriosState, GenomicBlock, InheritanceState,
    QuartetState, SiteOutcome, StateError, TrioState,
};

mod common;
use common::site;

#[test]
fn scenario_d_state_consistency_error() {
    let mut block = GenomicBlock::new("chr1", 0, 1_000, Some(QuartetState::Identical));
    let non_identical = site("chr1", 10, ["0/1", "0/1", "0/0", "1/1"]);
    assert_eq!(
        non_identical.candidates(),
        CandidateStates::one(QuartetState::NonIdentical)
    );

    let outcome = block.classify(&non_identical);

    assert_eq!(outcome, SiteOutcome::StateConsistencyError);
    let counts = block.counts();
    assert_eq!(counts.variants, 1);
    assert_eq!(counts.sce, 1);
    assert_eq!(counts.mie, 0);
    assert_eq!(counts.not_informative, 0);
}

#[test]
fn classifying_n_sites_counts_n_variants() {
    let mut block = GenomicBlock::new("chr1", 0, 1_000, Some(QuartetState::Paternal));
    let sites = [
        site("chr1", 1, ["0/1", "0/1", "0/0", "0/1"]),
        site("chr1", 2, ["0/0", "0/0", "0/0", "0/0"]),
        site("chr1", 3, ["0/0", "0/0", "1/1", "0/0"]),
        site("chr1", 4, ["0/1", "0/0", "0/0", "0/0"]),
        site("chr1", 5, ["0/0", "0/1", "0/0", "0/0"]),
    ];
    let outcomes: Vec<_> = sites.iter().map(|s| block.classify(s)).collect();

    assert_eq!(
        outcomes,
        vec![
            SiteOutcome::Consistent,
            SiteOutcome::NotInformative,
            SiteOutcome::Mie,
            SiteOutcome::Consistent,
            SiteOutcome::StateConsistencyError,
        ]
    );
    let counts = block.counts();
    assert_eq!(counts.variants, 5);
    assert_eq!(counts.mie + counts.sce + counts.not_informative, 3);
    assert_eq!(counts.sce_percent(), 20.0);
}

#[test]
fn empty_block_reports_zero_percentages() {
    let block = GenomicBlock::new("chr1", 0, 10, Some(QuartetState::Identical));
    let stats = block.statistics();
    assert_eq!(stats.mie_percent(), 0.0);
    assert_eq!(stats.sce_percent(), 0.0);
    assert_eq!(stats.not_informative_percent(), 0.0);
    assert_eq!(stats.length(), 10);
}

#[test]
fn cross_trios_blocks_judge_quartet_sites() {
    let paternal_only = CrossTriosState::new(TrioState::Identical, TrioState::NonIdentical);
    let mut block = GenomicBlock::new("chr1", 0, 100, Some(paternal_only));

    // Father het, mother hom, children agree: identical or paternal.
    let agree = site("chr1", 1, ["0/1", "0/0", "0/0", "0/0"]);
    assert_eq!(block.classify(&agree), SiteOutcome::Consistent);

    // Both founders het, children opposite homozygotes: non-identical only.
    let disagree = site("chr1", 2, ["0/1", "0/1", "0/0", "1/1"]);
    assert_eq!(block.classify(&disagree), SiteOutcome::StateConsistencyError);
    assert!(!paternal_only.accepts(QuartetState::NonIdentical));
}

#[test]
fn cross_trios_scores_are_illegal_outside_known_domain() {
    let state = CrossTriosState::new(TrioState::NotInformative, TrioState::Identical);
    assert_eq!(state.encode(), Err(StateError::Unencodable(state)));

    let block = GenomicBlock::new("chr1", 0, 100, Some(state));
    assert!(block.bedgraph().is_err());

    let index = BlockIndex::from_sorted_blocks(vec![block]).unwrap();
    assert!(index.bedgraph().is_err());
}

#[test]
fn cross_trios_round_trip_over_known_domain() {
    let mut scores = Vec::new();
    for paternal in TrioState::KNOWN {
        for maternal in TrioState::KNOWN {
            let state = CrossTriosState::new(paternal, maternal);
            let score = state.encode().unwrap();
            assert_eq!(CrossTriosState::decode(score).unwrap(), state);
            scores.push(score);
        }
    }
    scores.sort_unstable();
    assert_eq!(scores, (0..9).collect::<Vec<_>>());
}

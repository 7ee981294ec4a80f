use crate::config::Params;

/// A small host graph in `.lg` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fixture {
    /// Short name used in test output.
    pub name: &'static str,
    /// Graph source text.
    pub source: &'static str,
    /// Whether the graph is loaded as directed.
    pub directed: bool,
}

/// A fixture graph paired with parameters and the expected number of frequent patterns.
#[derive(Debug, Clone)]
pub struct TestCase {
    /// Short name used in test output.
    pub name: &'static str,
    /// Host graph.
    pub fixture: &'static Fixture,
    /// Mining parameters.
    pub params: Params,
    /// Number of frequent patterns the run must report.
    pub expected_patterns: usize,
}

/// Undirected 4-cycle A-B-A-B.
pub static CYCLE_ABAB: Fixture = Fixture {
    name: "cycle_abab",
    source: "t # 0\nv 0 A\nv 1 B\nv 2 A\nv 3 B\ne 0 1\ne 1 2\ne 2 3\ne 3 0\n",
    directed: false,
};

/// Undirected triangle with a single vertex label.
pub static TRIANGLE_AAA: Fixture = Fixture {
    name: "triangle_aaa",
    source: "v 0 A\nv 1 A\nv 2 A\ne 0 1\ne 1 2\ne 2 0\n",
    directed: false,
};

/// Directed chain A -> B -> C.
pub static CHAIN_ABC: Fixture = Fixture {
    name: "chain_abc",
    source: "v 0 A\nv 1 B\nv 2 C\ne 0 1\ne 1 2\n",
    directed: true,
};

/// Undirected star: center X with three Y leaves.
pub static STAR_XYYY: Fixture = Fixture {
    name: "star_xyyy",
    source: "v 0 X\nv 1 Y\nv 2 Y\nv 3 Y\ne 0 1\ne 0 2\ne 0 3\n",
    directed: false,
};

/// Two A vertices joined by opposite directed edges labeled x and y.
pub static LABELED_PAIR: Fixture = Fixture {
    name: "labeled_pair",
    source: "v 0 A\nv 1 A\ne 0 1 x\ne 1 0 y\n",
    directed: true,
};

/// Integer-labeled graph in the style of the citation datasets.
pub static NUMERIC_SMALL: Fixture = Fixture {
    name: "numeric_small",
    source: "# numeric labels\nt # 0\nv 0 1\nv 1 2\nv 2 1\nv 3 2\nv 4 10\ne 0 1 5\ne 2 3 5\ne 1 4 7\ne 3 4 7\n",
    directed: false,
};

lazy_static::lazy_static! {
    /// Fixture runs with hand-checked frequent-pattern counts.
    pub static ref BASIC_TEST_CASES: Vec<TestCase> = vec![
        TestCase {
            name: "cycle_abab_tau_1",
            fixture: &CYCLE_ABAB,
            params: Params::builder().tau(1).build(),
            expected_patterns: 5,
        },
        TestCase {
            name: "cycle_abab_tau_2",
            fixture: &CYCLE_ABAB,
            params: Params::builder().tau(2).build(),
            expected_patterns: 5,
        },
        TestCase {
            name: "cycle_abab_tau_3",
            fixture: &CYCLE_ABAB,
            params: Params::builder().tau(3).build(),
            expected_patterns: 0,
        },
        TestCase {
            name: "triangle_aaa_tau_3",
            fixture: &TRIANGLE_AAA,
            params: Params::builder().tau(3).build(),
            expected_patterns: 3,
        },
        TestCase {
            name: "triangle_aaa_tau_4",
            fixture: &TRIANGLE_AAA,
            params: Params::builder().tau(4).build(),
            expected_patterns: 0,
        },
        TestCase {
            name: "chain_abc_directed_tau_1",
            fixture: &CHAIN_ABC,
            params: Params::builder().tau(1).directed(true).build(),
            expected_patterns: 3,
        },
        TestCase {
            name: "star_xyyy_tau_1",
            fixture: &STAR_XYYY,
            params: Params::builder().tau(1).build(),
            expected_patterns: 3,
        },
        TestCase {
            name: "star_xyyy_tau_2",
            fixture: &STAR_XYYY,
            params: Params::builder().tau(2).build(),
            expected_patterns: 0,
        },
        TestCase {
            name: "labeled_pair_directed_tau_1",
            fixture: &LABELED_PAIR,
            params: Params::builder().tau(1).directed(true).build(),
            expected_patterns: 3,
        },
        TestCase {
            name: "labeled_pair_directed_tau_2",
            fixture: &LABELED_PAIR,
            params: Params::builder().tau(2).directed(true).build(),
            expected_patterns: 0,
        },
        TestCase {
            name: "labeled_pair_undirected_tau_2",
            fixture: &LABELED_PAIR,
            params: Params::builder().tau(2).build(),
            expected_patterns: 3,
        },
    ];
}

//! Rewrite small programs end to end and inspect the text.

use decouple_rewrite::{Options, RewriteError, Rewriter};
use decouple_syntax::*;
use decouple_tracer::Trace;

fn render(sections: &[Section], options: Options) -> Vec<String> {
    Rewriter::new(options, Trace::none())
        .render(sections)
        .unwrap()
        .lines()
        .map(String::from)
        .collect()
}

fn has(lines: &[String], line: &str) -> bool {
    lines.iter().any(|l| l == line)
}

#[test]
fn choice_over_facts() {
    // a(1). a(2). {b(X)} :- a(X).
    let lines = render(
        &[
            Section::new(SectionKind::PassThrough, [rule!(atom!(a(1))), rule!(atom!(a(2)))]),
            Section::new(SectionKind::Rules, [rule!({atom!(b(var!(X)))} if pos!(a(var!(X))))]),
        ],
        Options::default(),
    );
    assert!(has(&lines, "dom(1)."));
    assert!(has(&lines, "dom(2)."));
    assert!(has(&lines, "{b(X) : dom(X)}."));
    assert!(has(&lines, "sat :- sat_r1."));
    assert!(has(&lines, ":- not sat."));
    assert!(!lines.iter().any(|l| l.starts_with(":- b(")));
    assert!(!lines.iter().any(|l| l.contains("r1f_")));
}

#[test]
fn independent_head_variables() {
    // q(1). r(2). p(X,Y) :- q(X), r(Y).
    let lines = render(
        &[
            Section::new(SectionKind::PassThrough, [rule!(atom!(q(1))), rule!(atom!(r(2)))]),
            Section::new(
                SectionKind::Rules,
                [rule!(atom!(p(var!(X), var!(Y))), if pos!(q(var!(X))), pos!(r(var!(Y))))],
            ),
        ],
        Options {
            no_show: true,
            ..Options::default()
        },
    );
    assert!(!lines.iter().any(|l| l.contains("r1f_")));
    assert!(has(&lines, "sat_r1 :- r1_X(2), not q(2)."));
    assert!(has(&lines, "sat_r1 :- r1_Y(1), not r(1)."));
    assert!(has(&lines, "{p(X,Y) : dom(X), dom(Y)}."));
    assert!(has(&lines, "r1_unfound_0(2) :- not q(2)."));
    assert!(has(&lines, "r1_unfound_1(1) :- not r(1)."));
    for line in lines.iter().filter(|l| l.starts_with("r1_unfound")) {
        assert!(!line.starts_with("r1_unfound("), "{line}");
    }
    for line in lines.iter().filter(|l| l.contains("not q(") || l.contains("not r(")) {
        assert!(!(line.contains("r1_X") && line.contains("r1_Y")), "{line}");
    }
    assert!(has(&lines, ":- p(2,1), #sum {1:r1_unfound_0(2); 1:r1_unfound_1(1)} >= 1."));
    assert!(!lines.iter().any(|l| l.starts_with(":- p(1,2)")));
}

#[test]
fn positive_loop() {
    // d(1). p(X) :- q(X). q(X) :- p(X).  (normal)
    let lines = render(
        &[
            Section::new(SectionKind::PassThrough, [rule!(atom!(d(1)))]),
            Section::new(
                SectionKind::Normal,
                [
                    rule!(atom!(p(var!(X))), if pos!(q(var!(X)))),
                    rule!(atom!(q(var!(X))), if pos!(p(var!(X)))),
                ],
            ),
        ],
        Options {
            no_show: true,
            ..Options::default()
        },
    );
    assert!(has(&lines, "r1_unfound(1) :- not q(1)."));
    assert!(has(&lines, "r1_unfound(1) :- not _prec(q(1),p(1))."));
    assert!(has(&lines, "r2_unfound(1) :- not p(1)."));
    assert!(has(&lines, "r2_unfound(1) :- not _prec(p(1),q(1))."));
    assert!(has(&lines, "_prec(p(1),q(1)) | _prec(q(1),p(1))."));
    assert!(has(&lines, ":- p(1), #sum {1:r1_unfound(1)} >= 1."));
    assert!(has(&lines, ":- q(1), #sum {1:r2_unfound(1)} >= 1."));
    assert!(has(&lines, "sat :- sat_r1, sat_r2."));
}

#[test]
fn ground_rules_join_the_order() {
    // p(X) :- q(X). q(1) :- p(1).  (normal)
    let lines = render(
        &[Section::new(
            SectionKind::Normal,
            [
                rule!(atom!(p(var!(X))), if pos!(q(var!(X)))),
                rule!(atom!(q(1)), if pos!(p(1))),
            ],
        )],
        Options {
            no_show: true,
            ..Options::default()
        },
    );
    assert!(has(&lines, "q(1) :- p(1)."));
    assert!(has(&lines, "r1_unfound(1) :- not _prec(q(1),p(1))."));
    assert!(has(&lines, "rA_unfound(1) :- not p(1)."));
    assert!(has(&lines, "rA_unfound(1) :- not _prec(p(1),q(1))."));
    assert!(has(&lines, ":- p(1), #sum {1:r1_unfound(1)} >= 1."));
    assert!(has(&lines, ":- q(1), #sum {1:rA_unfound(1)} >= 1."));
    assert!(has(&lines, "_prec(p(1),q(1)) | _prec(q(1),p(1))."));
}

#[test]
fn ground_interval_heads_support_each_instance() {
    // q. p(1..2) :- q. p(X) :- r(X).
    let lines = render(
        &[
            Section::new(
                SectionKind::PassThrough,
                [rule!(atom!(q)), rule!(atom!(p(interval!(1..2))), if pos!(q))],
            ),
            Section::new(SectionKind::Rules, [rule!(atom!(p(var!(X))), if pos!(r(var!(X))))]),
        ],
        Options::default(),
    );
    assert!(has(&lines, "r1_unfound(1) :- not r(1)."));
    assert!(has(&lines, "r1_unfound(2) :- not r(2)."));
    assert!(!lines.iter().any(|l| l.starts_with("rA_unfound") || l.starts_with("rB_unfound")));
    assert!(!lines.iter().any(|l| l.starts_with(":- p(")));
}

#[test]
fn rules_sections_are_not_ordered() {
    let lines = render(
        &[
            Section::new(SectionKind::PassThrough, [rule!(atom!(d(1)))]),
            Section::new(
                SectionKind::Rules,
                [
                    rule!(atom!(p(var!(X))), if pos!(q(var!(X)))),
                    rule!(atom!(q(var!(X))), if pos!(p(var!(X)))),
                ],
            ),
        ],
        Options::default(),
    );
    assert!(!lines.iter().any(|l| l.contains("_prec")));
}

#[test]
fn three_cycles_are_forbidden() {
    let lines = render(
        &[
            Section::new(SectionKind::PassThrough, [rule!(atom!(d(interval!(1..3))))]),
            Section::new(SectionKind::Normal, [rule!(atom!(p(var!(X))), if neg!(d(var!(X))))]),
        ],
        Options::default(),
    );
    assert!(has(&lines, ":- _prec(p(1),p(2)), _prec(p(2),p(3)), _prec(p(3),p(1))."));
    assert!(has(&lines, ":- _prec(p(1),p(3)), _prec(p(3),p(2)), _prec(p(2),p(1))."));
    assert_eq!(lines.iter().filter(|l| l.contains(") | _prec(")).count(), 3);
}

#[test]
fn facts_are_never_justified() {
    // s(1). s(2). p(1). p(X) :- s(X), not t(X).
    let lines = render(
        &[
            Section::new(
                SectionKind::PassThrough,
                [rule!(atom!(s(interval!(1..2)))), rule!(atom!(p(1)))],
            ),
            Section::new(
                SectionKind::Rules,
                [rule!(atom!(p(var!(X))), if pos!(s(var!(X))), neg!(t(var!(X))))],
            ),
        ],
        Options::default(),
    );
    assert!(has(&lines, "r1_unfound(2) :- t(2)."));
    assert!(!lines.iter().any(|l| l.starts_with("r1_unfound(1)")));
    assert!(!lines.iter().any(|l| l.starts_with(":- p(1)")));
    assert!(!lines
        .iter()
        .any(|l| l.starts_with("r1_unfound") && l.contains("not s(")));
}

#[test]
fn ground_guess_changes_only_the_guess() {
    let sections = [
        Section::new(SectionKind::PassThrough, [rule!(atom!(q(interval!(1..2))))]),
        Section::new(SectionKind::Rules, [rule!(atom!(p(var!(X))), if pos!(q(var!(X))))]),
    ];
    let compact = render(&sections, Options::default());
    let enumerated = render(
        &sections,
        Options {
            ground_guess: true,
            ..Options::default()
        },
    );
    assert!(has(&compact, "{p(X) : dom(X)}."));
    assert!(has(&enumerated, "{p(1); p(2)}."));
    assert!(!enumerated.iter().any(|l| l.starts_with("dom(")));

    let rest = |lines: &[String]| {
        lines
            .iter()
            .filter(|l| !l.starts_with('{') && !l.starts_with("dom("))
            .cloned()
            .collect::<Vec<_>>()
    };
    assert_eq!(rest(&compact), rest(&enumerated));
}

#[test]
fn subdomains() {
    let lines = render(
        &[
            Section::new(
                SectionKind::PassThrough,
                [rule!(atom!(_dom_X(interval!(1..2)))), rule!(atom!(q(3)))],
            ),
            Section::new(SectionKind::Rules, [rule!(atom!(p(var!(X))), if pos!(q(var!(X))))]),
        ],
        Options::default(),
    );
    assert!(has(&lines, "{p(X) : _dom_X(X)}."));
    assert!(has(&lines, "r1_X(1) | r1_X(2)."));
    assert!(has(&lines, "dom(3)."));
    assert!(!lines.iter().any(|l| l.contains("r1_X(3)")));
}

#[test]
fn deterministic() {
    let sections = [
        Section::new(
            SectionKind::PassThrough,
            [rule!(atom!(e(1, 2))), rule!(atom!(e(2, 3))), rule!(atom!(n(interval!(1..3))))],
        ),
        Section::new(
            SectionKind::Rules,
            [
                rule!(
                    atom!(r(var!(X), var!(Y))),
                    if pos!(e(var!(X), var!(Z))),
                    pos!(e(var!(Z), var!(Y))),
                    rel!(var!(X), Ne, var!(Y)),
                ),
                rule!(if pos!(r(var!(X), var!(X)))),
            ],
        ),
        Section::new(SectionKind::Normal, [rule!(atom!(s(var!(X))), if pos!(n(var!(X))), neg!(r(var!(X), 3)))]),
    ];
    let first = render(&sections, Options::default());
    for _ in 0..3 {
        assert_eq!(render(&sections, Options::default()), first);
    }
    assert!(has(&first, "sat :- sat_r1, sat_r2, sat_r3."));
    assert!(first.iter().any(|l| l.starts_with("1<={r1f_Z(Z,")));
}

#[test]
fn malformed_rules_abort() {
    let sections = [Section::new(
        SectionKind::Rules,
        [rule!(atom!(p(var!(X))), if pos!(q(var!(X))), rel!(atom!(f(var!(X))), Lt, 2))],
    )];
    let mut text = String::new();
    let result = Rewriter::new(Options::default(), Trace::none()).rewrite(&sections, &mut text);
    assert!(matches!(result, Err(RewriteError::MalformedAst(_))));
    assert!(text.is_empty());
}

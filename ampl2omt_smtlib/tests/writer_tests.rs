use std::sync::OnceLock;

use ampl2omt_nl::{NlParser, Objective, Problem};
use ampl2omt_smtlib::{SmtlibWriter, WriterConfig};
use ampl2omt_term::{Term, TermStore};
use rstest::{fixture, rstest};

fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    let _ = INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

struct Vars {
    terms: TermStore,
    x: Vec<Term>,
}

#[fixture]
fn vars() -> Vars {
    init_test_logger();
    let mut terms = TermStore::new();
    let x = (0..4).map(|i| terms.var(format!("x{i}"))).collect();
    Vars { terms, x }
}

/// `(2*x0 + (x0*x1 + 1)) <= (-x0 + x0*x1)`, with `x0*x1` shared.
fn deeply_nested(terms: &mut TermStore, x: &[Term]) -> Term {
    let two = terms.real(2.0);
    let one = terms.real(1.0);
    let scaled = terms.mult(two, x[0]);
    let product = terms.mult(x[0], x[1]);
    let inner = terms.plus(product, one);
    let left = terms.plus(scaled, inner);
    let negated = terms.neg(x[0]);
    let right = terms.plus(negated, product);
    terms.le(left, right)
}

#[rstest]
fn declares_variables(vars: Vars) {
    let problem = Problem::new(vars.x.clone(), vec![], vec![]);
    let writer = SmtlibWriter::new(&vars.terms, WriterConfig::default());
    assert_eq!(
        writer.declare_vars(&problem),
        "(declare-fun x0 () Real)\n\
         (declare-fun x1 () Real)\n\
         (declare-fun x2 () Real)\n\
         (declare-fun x3 () Real)"
    );
}

#[rstest]
#[case(false, "(+ x0 x1)")]
#[case(true, "(let ((.def_0 (+ x0 x1))) .def_0)")]
fn flat_operator(mut vars: Vars, #[case] daggify: bool, #[case] expected: &str) {
    let term = vars.terms.plus(vars.x[0], vars.x[1]);
    let writer = SmtlibWriter::new(&vars.terms, WriterConfig::default());
    assert_eq!(writer.render_term(term, daggify), expected);
}

#[rstest]
#[case(false, "(+ (+ x0 x1) x2)")]
#[case(true, "(let ((.def_0 (+ x0 x1))) (let ((.def_1 (+ .def_0 x2))) .def_1))")]
fn nested_operator(mut vars: Vars, #[case] daggify: bool, #[case] expected: &str) {
    let inner = vars.terms.plus(vars.x[0], vars.x[1]);
    let term = vars.terms.plus(inner, vars.x[2]);
    let writer = SmtlibWriter::new(&vars.terms, WriterConfig::default());
    assert_eq!(writer.render_term(term, daggify), expected);
}

#[rstest]
fn deeply_nested_inlines_shared_subterms(mut vars: Vars) {
    let term = deeply_nested(&mut vars.terms, &vars.x);
    let writer = SmtlibWriter::new(&vars.terms, WriterConfig::default());
    assert_eq!(
        writer.render_term(term, false),
        "(<= (+ (* 2.0 x0) (+ (* x0 x1) 1.0)) (+ (- x0) (* x0 x1)))"
    );
}

#[rstest]
fn deeply_nested_binds_shared_subterms_once(mut vars: Vars) {
    let term = deeply_nested(&mut vars.terms, &vars.x);
    let writer = SmtlibWriter::new(&vars.terms, WriterConfig::default());
    assert_eq!(
        writer.render_term(term, true),
        "(let ((.def_0 (* 2.0 x0))) \
         (let ((.def_1 (* x0 x1))) \
         (let ((.def_2 (+ .def_1 1.0))) \
         (let ((.def_3 (+ .def_0 .def_2))) \
         (let ((.def_4 (- x0))) \
         (let ((.def_5 (+ .def_4 .def_1))) \
         (let ((.def_6 (<= .def_3 .def_5))) \
         .def_6)))))))"
    );
}

#[rstest]
fn shared_subterm_is_defined_once_and_referenced_twice(mut vars: Vars) {
    let shared = vars.terms.mult(vars.x[0], vars.x[1]);
    let sin = vars.terms.sin(shared);
    let term = vars.terms.plus(shared, sin);
    let writer = SmtlibWriter::new(&vars.terms, WriterConfig::default());

    let text = writer.render_term(term, true);

    assert_eq!(text.matches("(* x0 x1)").count(), 1);
    assert_eq!(text.matches(".def_0").count(), 3);
    assert_eq!(
        text,
        "(let ((.def_0 (* x0 x1))) (let ((.def_1 (sin .def_0))) \
         (let ((.def_2 (+ .def_0 .def_1))) .def_2)))"
    );
}

fn sample_problem(terms: &mut TermStore, x: &[Term]) -> Problem {
    let zero = terms.real(0.0);
    let two = terms.real(2.0);
    let scaled = terms.mult(two, x[3]);
    let sin = terms.sin(scaled);
    let sum = terms.plus(x[1], x[2]);
    let constraints = vec![terms.le(x[0], x[1]), terms.ge(x[2], zero), terms.eq(x[3], sin)];
    let objectives = vec![
        Objective::minimize(x[0]),
        Objective::maximize(terms.mult(sum, x[3])),
    ];
    Problem::new(x[..3].to_vec(), objectives, constraints)
}

#[rstest]
fn renders_full_script(mut vars: Vars) {
    let problem = sample_problem(&mut vars.terms, &vars.x);
    let writer = SmtlibWriter::new(&vars.terms, WriterConfig::default());
    assert_eq!(
        writer.render(&problem),
        "(set-logic QF_NRAT)\n\
         (set-option :produce-models true)\n\n\
         (declare-fun x0 () Real)\n\
         (declare-fun x1 () Real)\n\
         (declare-fun x2 () Real)\n\n\
         (assert (<= x0 x1))\n\
         (assert (>= x2 0.0))\n\
         (assert (= x3 (sin (* 2.0 x3))))\n\n\
         (minimize x0)\n\
         (maximize (* (+ x1 x2) x3))\n\n\
         (check-sat)\n\
         (get-objectives)"
    );
}

#[rstest]
fn daggify_applies_to_assertions_and_objectives(mut vars: Vars) {
    let problem = sample_problem(&mut vars.terms, &vars.x);
    let config = WriterConfig::builder().daggify(true).build();
    let writer = SmtlibWriter::new(&vars.terms, config);

    let text = writer.render(&problem);

    assert!(text.contains("(assert (let ((.def_0 (<= x0 x1))) .def_0))"));
    assert!(text.contains("(minimize x0)"));
    assert!(text.contains(
        "(maximize (let ((.def_0 (+ x1 x2))) (let ((.def_1 (* .def_0 x3))) .def_1)))"
    ));
}

#[test]
fn hs001_end_to_end() {
    init_test_logger();
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("ampl2omt_nl")
        .join("tests")
        .join("fixtures")
        .join("hs001.nl");
    let mut terms = TermStore::new();
    let problem = NlParser::new(&mut terms).parse_file(path).unwrap();
    let writer = SmtlibWriter::new(&terms, WriterConfig::default());

    assert_eq!(
        writer.render(&problem),
        "(set-logic QF_NRAT)\n\
         (set-option :produce-models true)\n\n\
         (declare-fun x0 () Real)\n\
         (declare-fun x1 () Real)\n\n\
         (assert (>= x1 -1.5))\n\n\
         (minimize (+ (* 100.0 (pow (- x1 (pow x0 2.0)) 2.0)) (pow (- 1.0 x0) 2.0)))\n\n\
         (check-sat)\n\
         (get-objectives)"
    );
}

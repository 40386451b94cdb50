// Allocation accounting for failed and successful parses.
//
// Live allocations are counted per thread so the test harness's own
// bookkeeping on other threads never shows up in the numbers.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

use tinyfront::parser::{parse_source, AstNode};

struct CountingAllocator;

thread_local! {
    static LIVE: Cell<isize> = const { Cell::new(0) };
    static TOTAL: Cell<usize> = const { Cell::new(0) };
}

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            let _ = LIVE.try_with(|live| live.set(live.get() + 1));
            let _ = TOTAL.try_with(|total| total.set(total.get() + 1));
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        let _ = LIVE.try_with(|live| live.set(live.get() - 1));
    }
}

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

fn live() -> isize {
    LIVE.with(Cell::get)
}

fn total() -> usize {
    TOTAL.with(Cell::get)
}

fn assert_failed_parse_releases_everything(source: &str) {
    // Warm up one-time statics (keyword table, log callsites) on this path
    drop(parse_source(source));

    let before = live();
    let allocations_before = total();

    let result = parse_source(source);
    assert!(result.is_err(), "expected {:?} to fail", source);
    drop(result);

    assert!(
        total() > allocations_before,
        "parsing {:?} allocated nothing; the harness is not counting",
        source
    );
    assert_eq!(live(), before, "parsing {:?} leaked allocations", source);
}

#[test]
fn test_unclosed_block_releases_partial_tree() {
    assert_failed_parse_releases_everything("if (1) { return 1; ");
}

#[test]
fn test_failures_deep_in_the_grammar_release_everything() {
    for source in [
        "return 1 + 2 * (3 - ;",
        "for (i = 0; i < 10; i = i + 1) { x = x + \"unterminated; }",
        "if (a && b) { define x = 1; y = f(x, 2); } else { return z[",
        "fun f(int a, string* b) -> int { if (a) { return b; } else ",
        "int[3] xs = {1, 2, 3",
        "{ { { x = 1; } } ",
        "import std.io",
        "x = 1 @ 2;",
    ] {
        assert_failed_parse_releases_everything(source);
    }
}

#[test]
fn test_successful_parse_is_released_on_drop() {
    let source = "fun main() -> int { for (;;) { break; } return 0; }";
    drop(parse_source(source));

    let before = live();
    let program = parse_source(source).unwrap();
    assert!(live() > before);
    drop(program);
    assert_eq!(live(), before);
}

#[test]
fn test_single_node_teardown() {
    let before = live();
    let node = AstNode::break_stmt();
    assert_eq!(node.children().len(), 0);
    drop(node);

    let node = AstNode::identifier("name");
    drop(node);
    assert_eq!(live(), before);
}

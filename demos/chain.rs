use try_catch_chain::{throw, try_catch, Error};

fn main() {
    let err_foo = Error::msg("");

    // Test 1: Work completes, nothing registered
    println!("=== Test 1: Plain run ===");
    try_catch(|| println!("ok")).run();

    // Test 2: Panic caught by the matching sentinel
    println!("\n=== Test 2: Matching catch ===");
    try_catch(|| throw(err_foo.clone()))
        .catch(&Error::msg("bar"), |_| println!("bar"))
        .catch(&err_foo, |_| println!("foo"))
        .run();

    // Test 3: No sentinel matches, default handles it
    println!("\n=== Test 3: Default catch ===");
    try_catch(|| throw!("test"))
        .catch(&Error::msg("bar"), |_| println!("bar"))
        .catch(&err_foo, |_| println!("foo"))
        .default_catch(|e| println!("other: {}", e))
        .run();

    // Test 4: No panic, else runs
    println!("\n=== Test 4: Else ===");
    try_catch(|| {
        let _ = 100 + 19;
    })
    .default_catch(|_| println!("other"))
    .otherwise(|| println!("else"))
    .run();

    // Test 5: Panic, default and finally
    println!("\n=== Test 5: Default + finally ===");
    try_catch(|| throw!("test"))
        .default_catch(|_| println!("other"))
        .otherwise(|| println!("else"))
        .finally(|| println!("finally"))
        .run();

    // Test 6: Plain panic payloads become "panic: ..." errors
    println!("\n=== Test 6: String payload ===");
    try_catch(|| panic!("string"))
        .default_catch(|e| println!("{} (synthetic: {})", e, e.is_panic()))
        .run();

    // Test 7: Nothing matches, finally runs, then the panic keeps going
    println!("\n=== Test 7: Unhandled ===");
    try_catch(|| throw!("test"))
        .catch(&err_foo, |_| println!("catch success"))
        .finally(|| println!("not caught, finally"))
        .run();

    println!("unreachable");
}

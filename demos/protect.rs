use try_catch_chain::{protect, protect_return, protect_return2, throw, Error};

fn main() {
    let err_foo = Error::msg("foo");

    // Test 1: Normal completion
    println!("=== Test 1: Normal ===");
    let result = protect(|| println!("ok"));
    println!("Result: {:?}\n", result.map_err(|e| e.to_string()));

    // Test 2: Panic with a sentinel
    println!("=== Test 2: Sentinel ===");
    let result = protect(|| throw(err_foo.clone()));
    match result {
        Err(e) if e.is(&err_foo) => println!("caught foo: {}\n", e),
        other => println!("unexpected: {:?}\n", other.map_err(|e| e.to_string())),
    }

    // Test 3: Returning values
    println!("=== Test 3: Returning ===");
    let v = protect_return(|| 10086);
    println!("Value: {:?}", v.map_err(|e| e.to_string()));
    let pair = protect_return2(|| (10086, "10010"));
    println!("Pair: {:?}\n", pair.map_err(|e| e.to_string()));

    // Test 4: Returning, but the work panics
    println!("=== Test 4: Returning with panic ===");
    let v = protect_return(|| -> i32 { panic!("no value") });
    println!("Value: {:?}", v.map_err(|e| e.to_string()));
}

/// Welcome document shown on first run.
pub const EXAMPLE_TEXT: &str = "// Welcome to Numbers.
// Here's a quick guide to show you what this calculator can do.

// 1. You can assign variables.
x = 10
y = 5

// 2. Perform mathematical operations with variables.
x + y
x * y

// 3. Use the sum function to sum specific lines.
sum(9, 10) // This sums the results of lines 9 and 10.

// 4. Or sum everything above.
sum

// 5. Press Ctrl+Enter to split a long expression over several lines.
[Expr Start]
(x + y) *
2
[Expr End]

// 6. Try deleting or modifying lines to see dynamic changes.
";

fn main() {
  ord_stake::main();
}

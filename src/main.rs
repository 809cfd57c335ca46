fn main() {
    arena_caster::game::run();
}

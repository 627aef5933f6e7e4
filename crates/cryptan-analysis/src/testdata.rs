//! English text that never appears in the embedded corpus, so solver
//! tests cannot lean on n-gram or dictionary statistics of the very text
//! they decrypt.

pub const UNSEEN_PASSAGES: &[&str] = &[
    "The railway reached the valley in the spring of that year, and with it \
     came a stranger who carried nothing but a leather bag and a folded map. \
     He took a room above the bakery and spent his days walking along the \
     river, stopping now and then to write something in a small black \
     notebook. People in the village watched him from their windows and \
     wondered what he wanted. Some said he was a surveyor sent by the \
     government to measure the land before it was sold. Others believed he \
     was looking for gold, because an old story told of a miner who had \
     hidden a fortune somewhere in the hills. The truth was much simpler. He \
     was a painter who had lost his sight in one eye during the war, and a \
     doctor had told him that he might soon lose the other. He wanted to see \
     as much of the world as he could while there was still time, and he had \
     chosen the valley because his mother had been born there. Every evening \
     he sat on the bridge until the light was gone, trying to remember the \
     exact color of the water. When the autumn came he left as quietly as he \
     had arrived, and nobody in the village ever heard from him again. Years \
     later a box arrived at the post office with no letter and no return \
     address. Inside were twelve small paintings of the river, each one made \
     at a different hour of the day.",
    "Every winter the lake froze so hard that the farmers could drive their \
     carts across it to the market on the far shore. The children of the \
     northern farms learned to skate before they could read, and the older \
     boys held races on the ice that lasted until the sun went down. One year \
     the cold came late, and the ice was thinner than anyone had known it to \
     be. A young girl named Anna was sent across with a basket of eggs for \
     her grandmother, and halfway over she heard a sound like a door being \
     slammed in an empty house. She stopped and looked down. A long crack had \
     opened under her feet and was running toward the shore faster than she \
     could walk. Her father had taught her what to do, and she did not panic. \
     She lay flat on the ice, spread her arms wide, and began to crawl back \
     the way she had come, pushing the basket in front of her. It took her \
     nearly an hour to reach the bank, and by then her hands were so cold \
     that she could not feel them. When she finally stood up she saw that not \
     a single egg had broken. Her grandmother laughed for a long time when \
     she heard the story, and for the rest of her life she told anyone who \
     would listen that the bravest person in the family was a child who would \
     not leave her eggs behind.",
];
